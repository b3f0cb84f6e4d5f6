pub mod cli;
pub mod toml_config;

use crate::adapters::report::REPORT_FORMATS;
use crate::core::overlap::{OverlapStrategy, DEFAULT_SWEEP_THRESHOLD};
use crate::core::selection::SelectionRule;
use crate::core::ConfigProvider;
use crate::utils::error::{OverlapError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path,
    validate_positive_number, validate_range, Validate,
};
use chrono::NaiveDate;

pub const DEFAULT_MAX_PARALLEL: usize = 8;
pub const MAX_PARALLEL_LIMIT: usize = 1024;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input_path: String,
    pub data_dir: String,
    pub has_headers: bool,
    pub delimiter: u8,
    /// Empty means the built-in list.
    pub date_formats: Vec<String>,
    pub reference_date: NaiveDate,
    pub selection: SelectionRule,
    pub sweep_threshold: usize,
    pub max_parallel: usize,
    pub parallel: bool,
    pub output_format: String,
    pub output_path: Option<String>,
    pub monitor: bool,
}

impl AnalysisConfig {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            input_path: String::new(),
            data_dir: ".".to_string(),
            has_headers: false,
            delimiter: b',',
            date_formats: Vec::new(),
            reference_date,
            selection: SelectionRule::default(),
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
            max_parallel: DEFAULT_MAX_PARALLEL,
            parallel: true,
            output_format: "text".to_string(),
            output_path: None,
            monitor: false,
        }
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_file_extension("input", &self.input_path, &["csv"])?;
        for format in &self.date_formats {
            validate_non_empty_string("date_formats", format)?;
        }
        validate_positive_number("sweep_threshold", self.sweep_threshold, 1)?;
        validate_range("max_parallel", self.max_parallel, 1, MAX_PARALLEL_LIMIT)?;
        validate_one_of("format", &self.output_format, REPORT_FORMATS)?;
        if let Some(path) = &self.output_path {
            validate_path("output", path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for AnalysisConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn has_headers(&self) -> bool {
        self.has_headers
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn selection_rule(&self) -> SelectionRule {
        self.selection
    }

    fn overlap_strategy(&self) -> OverlapStrategy {
        OverlapStrategy::Auto {
            sweep_threshold: self.sweep_threshold,
        }
    }

    fn max_parallel(&self) -> usize {
        if self.parallel {
            self.max_parallel
        } else {
            1
        }
    }

    fn output_format(&self) -> &str {
        &self.output_format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

pub(crate) fn delimiter_byte(field: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(OverlapError::InvalidConfigValueError {
            field: field.to_string(),
            value: c.to_string(),
            reason: "Delimiter must be an ASCII character".to_string(),
        })
    }
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::{delimiter_byte, AnalysisConfig};
    use crate::config::toml_config::TomlConfig;
    use crate::core::selection::SelectionRule;
    use crate::utils::error::Result;
    use chrono::NaiveDate;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "pair-overlap")]
    #[command(about = "Finds the pair of employees who worked together on common projects the longest")]
    pub struct CliConfig {
        /// CSV file with EmpID, ProjectID, DateFrom, DateTo rows; prompts for one when omitted
        #[arg(short, long)]
        pub input: Option<String>,

        /// Directory searched for CSV files when no input is given [default: .]
        #[arg(long)]
        pub data_dir: Option<String>,

        /// TOML configuration file; command line values take precedence
        #[arg(short, long)]
        pub config: Option<String>,

        /// Date substituted for open (NULL) end dates [default: today]
        #[arg(long)]
        pub reference_date: Option<NaiveDate>,

        /// Winning pair rule: single or total [default: single]
        #[arg(long)]
        pub selection: Option<SelectionRule>,

        /// Report format: text, csv or json [default: text]
        #[arg(short, long)]
        pub format: Option<String>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// First row of the input is a header
        #[arg(long)]
        pub has_headers: bool,

        /// Field delimiter of the input [default: ,]
        #[arg(long)]
        pub delimiter: Option<char>,

        /// Accepted date format (chrono syntax); repeat to try several
        #[arg(long = "date-format")]
        pub date_formats: Vec<String>,

        /// Group size above which the sweep-line scan is used [default: 64]
        #[arg(long)]
        pub sweep_threshold: Option<usize>,

        /// Maximum project groups analysed concurrently, 1 to 1024 [default: 8]
        #[arg(long)]
        pub max_parallel: Option<usize>,

        /// Analyse project groups one after another
        #[arg(long)]
        pub sequential: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// Merges the optional TOML file with the flags given on the command line.
        pub fn resolve(&self, today: NaiveDate) -> Result<AnalysisConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    TomlConfig::from_file(path)?.into_analysis_config(today)?
                }
                None => AnalysisConfig::new(today),
            };

            if let Some(input) = &self.input {
                config.input_path = input.clone();
            }
            if let Some(dir) = &self.data_dir {
                config.data_dir = dir.clone();
            }
            if let Some(date) = self.reference_date {
                config.reference_date = date;
            }
            if let Some(selection) = self.selection {
                config.selection = selection;
            }
            if let Some(format) = &self.format {
                config.output_format = format.to_ascii_lowercase();
            }
            if let Some(output) = &self.output {
                config.output_path = Some(output.clone());
            }
            if self.has_headers {
                config.has_headers = true;
            }
            if let Some(delimiter) = self.delimiter {
                config.delimiter = delimiter_byte("delimiter", delimiter)?;
            }
            if !self.date_formats.is_empty() {
                config.date_formats = self.date_formats.clone();
            }
            if let Some(threshold) = self.sweep_threshold {
                config.sweep_threshold = threshold;
            }
            if let Some(max_parallel) = self.max_parallel {
                config.max_parallel = max_parallel;
            }
            if self.sequential {
                config.parallel = false;
            }
            if self.monitor {
                config.monitor = true;
            }

            Ok(config)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        let mut config = AnalysisConfig::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        config.input_path = "team.csv".to_string();
        config
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(config().validate().is_ok());

        let mut wrong_extension = config();
        wrong_extension.input_path = "team.xlsx".to_string();
        assert!(wrong_extension.validate().is_err());

        let mut no_workers = config();
        no_workers.max_parallel = 0;
        assert!(no_workers.validate().is_err());

        let mut unknown_format = config();
        unknown_format.output_format = "yaml".to_string();
        assert!(unknown_format.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_worker_count() {
        let mut at_limit = config();
        at_limit.max_parallel = MAX_PARALLEL_LIMIT;
        assert!(at_limit.validate().is_ok());

        let mut huge = config();
        huge.max_parallel = usize::MAX;
        assert!(matches!(
            huge.validate(),
            Err(OverlapError::InvalidConfigValueError { ref field, .. }) if field == "max_parallel"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_sweep_threshold() {
        let mut always_sweep = config();
        always_sweep.sweep_threshold = 1;
        assert!(always_sweep.validate().is_ok());

        let mut zero = config();
        zero.sweep_threshold = 0;
        assert!(matches!(
            zero.validate(),
            Err(OverlapError::InvalidConfigValueError { ref field, .. }) if field == "sweep_threshold"
        ));
    }

    #[test]
    fn test_sequential_reports_single_worker() {
        let mut sequential = config();
        sequential.parallel = false;

        assert_eq!(sequential.max_parallel(), 1);
        assert_eq!(config().max_parallel(), DEFAULT_MAX_PARALLEL);
    }
}
