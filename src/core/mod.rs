pub mod engine;
pub mod grouping;
pub mod overlap;
pub mod selection;

pub use crate::domain::model::{AnalysisOutcome, AnalysisResult, AssignmentRecord, OverlapRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
