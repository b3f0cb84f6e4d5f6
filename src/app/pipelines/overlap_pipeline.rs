use crate::adapters::csv_source::CsvAssignmentSource;
use crate::adapters::dates::DateParser;
use crate::adapters::report::{render, ReportFormat};
use crate::core::engine::find_overlaps_parallel;
use crate::core::grouping::{collaborating_groups, group_by_project};
use crate::core::overlap::find_all_overlaps;
use crate::core::selection::select_winner;
use crate::core::{AnalysisResult, AssignmentRecord, ConfigProvider, Pipeline, Storage};
use crate::utils::error::{OverlapError, Result};

/// Reads assignments through a [`Storage`], finds the longest working pair
/// and renders the report.
pub struct OverlapPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> OverlapPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn source(&self) -> CsvAssignmentSource {
        CsvAssignmentSource::new(self.config.reference_date())
            .with_headers(self.config.has_headers())
            .with_delimiter(self.config.delimiter())
            .with_date_parser(DateParser::new(self.config.date_formats()))
    }

    fn report_format(&self) -> Result<ReportFormat> {
        let format = self.config.output_format();
        format
            .parse::<ReportFormat>()
            .map_err(|reason| OverlapError::InvalidConfigValueError {
                field: "format".to_string(),
                value: format.to_string(),
                reason,
            })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for OverlapPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<AssignmentRecord>> {
        let path = self.config.input_path();
        tracing::debug!(
            "Reading assignments from {} (open end dates resolve to {})",
            path,
            self.config.reference_date()
        );

        let data = self.storage.read_file(path).await?;
        self.source().read(data.as_slice())
    }

    async fn transform(&self, records: Vec<AssignmentRecord>) -> Result<AnalysisResult> {
        let groups = group_by_project(&records);
        let groups_analyzed = collaborating_groups(&groups).count();
        tracing::debug!(
            "{} projects, {} with more than one member",
            groups.len(),
            groups_analyzed
        );

        let strategy = self.config.overlap_strategy();
        let max_parallel = self.config.max_parallel();
        let overlaps = if max_parallel > 1 {
            find_overlaps_parallel(&groups, strategy, max_parallel).await?
        } else {
            find_all_overlaps(&groups, strategy)
        };

        let outcome = select_winner(&overlaps, self.config.selection_rule());
        match outcome.winner() {
            Some(report) => tracing::info!(
                "Longest working pair: {} and {} ({} days, {} shared projects)",
                report.pair.low,
                report.pair.high,
                report.max_overlap_days,
                report.projects.len()
            ),
            None => tracing::info!("No two employees have overlapping assignments"),
        }

        Ok(AnalysisResult {
            outcome,
            records_read: records.len(),
            groups_analyzed,
            overlaps_found: overlaps.len(),
        })
    }

    async fn load(&self, result: AnalysisResult) -> Result<String> {
        let rendered = render(&result.outcome, self.report_format()?)?;

        match self.config.output_path() {
            Some(path) => {
                self.storage.write_file(path, rendered.as_bytes()).await?;
                tracing::debug!("Report saved to {}", path);
                Ok(format!("Report saved to: {}", path))
            }
            None => Ok(rendered),
        }
    }
}
