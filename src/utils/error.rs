use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("Unrecognized date '{value}' on line {line}")]
    DateParse { line: u64, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No CSV files found in {dir}")]
    NoInputFiles { dir: String },

    #[error("Invalid file selection: '{input}'")]
    InvalidSelection { input: String },

    #[error("Overlap task failed: {message}")]
    Task { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Interaction,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OverlapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OverlapError::CsvError(_)
            | OverlapError::InvalidRecord { .. }
            | OverlapError::DateParse { .. } => ErrorCategory::Input,
            OverlapError::ConfigError { .. }
            | OverlapError::ConfigValidationError { .. }
            | OverlapError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OverlapError::NoInputFiles { .. } | OverlapError::InvalidSelection { .. } => {
                ErrorCategory::Interaction
            }
            OverlapError::IoError(_)
            | OverlapError::SerializationError(_)
            | OverlapError::Task { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Interaction => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OverlapError::CsvError(_) => {
                "Check that the file is delimited text and the delimiter setting matches".to_string()
            }
            OverlapError::InvalidRecord { line, .. } => format!(
                "Fix line {} so it reads EmpID, ProjectID, DateFrom, DateTo with DateFrom <= DateTo",
                line
            ),
            OverlapError::DateParse { line, .. } => format!(
                "Use a supported date format on line {} (e.g. 2023-01-31) or NULL for an open end date",
                line
            ),
            OverlapError::ConfigError { .. } | OverlapError::ConfigValidationError { .. } => {
                "Review the configuration file for syntax errors".to_string()
            }
            OverlapError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            OverlapError::NoInputFiles { .. } => {
                "Pass --input <file.csv> or point --data-dir at a directory with CSV files".to_string()
            }
            OverlapError::InvalidSelection { .. } => {
                "Enter one of the listed file numbers".to_string()
            }
            OverlapError::IoError(_) => "Check that the path exists and is readable".to_string(),
            OverlapError::SerializationError(_) | OverlapError::Task { .. } => {
                "Re-run with --verbose and report the log output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The input file could not be read: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::Interaction => self.to_string(),
            ErrorCategory::System => format!("An unexpected error occurred: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverlapError>;
