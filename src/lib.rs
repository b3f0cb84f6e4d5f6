pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::overlap_pipeline::OverlapPipeline;
pub use config::{cli::LocalStorage, AnalysisConfig};
pub use core::engine::AnalysisEngine;
pub use domain::model::{AnalysisOutcome, AssignmentRecord, EmployeePair, OverlapRecord, PairReport, ProjectOverlap};
pub use utils::error::{OverlapError, Result};
