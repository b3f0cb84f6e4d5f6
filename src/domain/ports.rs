use crate::core::overlap::OverlapStrategy;
use crate::core::selection::SelectionRule;
use crate::domain::model::{AnalysisResult, AssignmentRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn has_headers(&self) -> bool;
    fn delimiter(&self) -> u8;
    fn date_formats(&self) -> &[String];
    fn reference_date(&self) -> NaiveDate;
    fn selection_rule(&self) -> SelectionRule;
    fn overlap_strategy(&self) -> OverlapStrategy;
    /// Upper bound on project groups analysed concurrently; 1 means sequential.
    fn max_parallel(&self) -> usize;
    fn output_format(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<AssignmentRecord>>;
    async fn transform(&self, records: Vec<AssignmentRecord>) -> Result<AnalysisResult>;
    async fn load(&self, result: AnalysisResult) -> Result<String>;
}
