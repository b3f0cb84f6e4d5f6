use crate::config::{delimiter_byte, AnalysisConfig};
use crate::core::selection::SelectionRule;
use crate::utils::error::{OverlapError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration. Every section is optional; missing values fall
/// back to the defaults of [`AnalysisConfig`].
///
/// Dates are quoted strings (`reference_date = "2024-06-30"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub data_dir: Option<String>,
    pub has_headers: Option<bool>,
    pub delimiter: Option<String>,
    pub date_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub reference_date: Option<NaiveDate>,
    /// "single" or "total"
    pub selection: Option<String>,
    pub sweep_threshold: Option<usize>,
    pub max_parallel: Option<usize>,
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: Option<bool>,
}

impl TomlConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OverlapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OverlapError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers this file over the defaults; `today` is used only when no
    /// reference date is configured.
    pub fn into_analysis_config(self, today: NaiveDate) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::new(self.analysis.reference_date.unwrap_or(today));

        if let Some(path) = self.input.path {
            config.input_path = path;
        }
        if let Some(dir) = self.input.data_dir {
            config.data_dir = dir;
        }
        if let Some(has_headers) = self.input.has_headers {
            config.has_headers = has_headers;
        }
        if let Some(delimiter) = self.input.delimiter {
            let mut chars = delimiter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => config.delimiter = delimiter_byte("input.delimiter", c)?,
                _ => {
                    return Err(OverlapError::InvalidConfigValueError {
                        field: "input.delimiter".to_string(),
                        value: delimiter,
                        reason: "Delimiter must be a single character".to_string(),
                    })
                }
            }
        }
        if let Some(formats) = self.input.date_formats {
            config.date_formats = formats;
        }

        if let Some(selection) = self.analysis.selection {
            config.selection = selection.parse::<SelectionRule>().map_err(|reason| {
                OverlapError::InvalidConfigValueError {
                    field: "analysis.selection".to_string(),
                    value: selection.clone(),
                    reason,
                }
            })?;
        }
        if let Some(threshold) = self.analysis.sweep_threshold {
            config.sweep_threshold = threshold;
        }
        if let Some(max_parallel) = self.analysis.max_parallel {
            config.max_parallel = max_parallel;
        }
        if let Some(parallel) = self.analysis.parallel {
            config.parallel = parallel;
        }

        if let Some(format) = self.output.format {
            config.output_format = format;
        }
        config.output_path = self.output.path.or(config.output_path);

        if let Some(enabled) = self.monitoring.enabled {
            config.monitor = enabled;
        }

        Ok(config)
    }
}
