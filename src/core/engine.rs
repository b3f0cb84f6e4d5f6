use crate::core::grouping::{collaborating_groups, ProjectGroups};
use crate::core::overlap::{find_group_overlaps, sort_overlaps, OverlapStrategy};
use crate::core::Pipeline;
use crate::domain::model::OverlapRecord;
use crate::utils::error::{OverlapError, Result};
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting overlap analysis");
        self.monitor.log_stats("Start");

        tracing::info!("Reading assignments...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Read {} assignment records", records.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Computing overlaps...");
        let result = self.pipeline.transform(records).await?;
        tracing::info!(
            "Scanned {} project groups, found {} overlapping pairs",
            result.groups_analyzed,
            result.overlaps_found
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Rendering report...");
        let output = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output)
    }
}

/// Scans project groups on the blocking pool, at most `max_parallel` at a time.
///
/// Each task owns a copy of its group and returns its own records; the merge
/// is a concatenation followed by a total-order sort. `max_parallel` is clamped
/// to `1..=Semaphore::MAX_PERMITS`.
pub async fn find_overlaps_parallel(
    groups: &ProjectGroups,
    strategy: OverlapStrategy,
    max_parallel: usize,
) -> Result<Vec<OverlapRecord>> {
    let permits = Arc::new(Semaphore::new(max_parallel.clamp(1, Semaphore::MAX_PERMITS)));
    let mut tasks = JoinSet::new();

    for (project_id, members) in collaborating_groups(groups) {
        let members = members.to_vec();
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| OverlapError::Task {
                message: e.to_string(),
            })?;

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let found = find_group_overlaps(&members, strategy);
            tracing::debug!(
                "Project {}: {} members, {} overlapping pairs",
                project_id,
                members.len(),
                found.len()
            );
            found
        });
    }

    let mut merged = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let found = joined.map_err(|e| OverlapError::Task {
            message: e.to_string(),
        })?;
        merged.extend(found);
    }

    sort_overlaps(&mut merged);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grouping::group_by_project;
    use crate::core::overlap::find_all_overlaps;
    use crate::domain::model::{AnalysisOutcome, AnalysisResult, AssignmentRecord};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn many_projects() -> Vec<AssignmentRecord> {
        let mut records = Vec::new();
        for project in 0..20i64 {
            for employee in 0..6i64 {
                let start = date("2020-01-01") + chrono::Duration::days(employee * 17 + project);
                let end = start + chrono::Duration::days(40 + employee * 3);
                records.push(AssignmentRecord::new(employee + project % 3, project, start, end));
            }
        }
        records
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let groups = group_by_project(&many_projects());

        let sequential = find_all_overlaps(&groups, OverlapStrategy::AllPairs);
        let parallel = find_overlaps_parallel(&groups, OverlapStrategy::AllPairs, 4)
            .await
            .unwrap();

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn test_parallel_is_idempotent() {
        let groups = group_by_project(&many_projects());

        let first = find_overlaps_parallel(&groups, OverlapStrategy::default(), 8)
            .await
            .unwrap();
        let second = find_overlaps_parallel(&groups, OverlapStrategy::SweepLine, 1)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_parallel_with_no_groups() {
        let found = find_overlaps_parallel(&ProjectGroups::new(), OverlapStrategy::default(), 0)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_parallel_clamps_oversized_worker_count() {
        let groups = group_by_project(&many_projects());

        let sequential = find_all_overlaps(&groups, OverlapStrategy::default());
        let parallel = find_overlaps_parallel(&groups, OverlapStrategy::default(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    struct FixedPipeline;

    #[async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<Vec<AssignmentRecord>> {
            Ok(vec![AssignmentRecord::new(1, 10, date("2023-01-01"), date("2023-01-10"))])
        }

        async fn transform(&self, records: Vec<AssignmentRecord>) -> Result<AnalysisResult> {
            Ok(AnalysisResult {
                outcome: AnalysisOutcome::NoOverlap,
                records_read: records.len(),
                groups_analyzed: 0,
                overlaps_found: 0,
            })
        }

        async fn load(&self, result: AnalysisResult) -> Result<String> {
            Ok(format!("{} records", result.records_read))
        }
    }

    #[tokio::test]
    async fn test_engine_runs_all_phases() {
        let engine = AnalysisEngine::new(FixedPipeline);

        assert_eq!(engine.run().await.unwrap(), "1 records");
    }
}
