use crate::domain::model::{AnalysisOutcome, EmployeePair, OverlapRecord, PairReport};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Which figure decides the winning pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionRule {
    /// The pair owning the single largest overlap record.
    #[default]
    LongestSingleProject,
    /// The pair with the largest sum of overlaps across all shared projects.
    LongestTotal,
}

impl std::str::FromStr for SelectionRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "single" => Ok(SelectionRule::LongestSingleProject),
            "total" => Ok(SelectionRule::LongestTotal),
            other => Err(format!("unknown selection rule '{}', expected single or total", other)),
        }
    }
}

/// Picks the winning pair and rebuilds its per-project breakdown.
///
/// Ties on days go to the smallest `(low, high)` employee pair, then to the
/// smallest project id, so the result does not depend on input order.
pub fn select_winner(records: &[OverlapRecord], rule: SelectionRule) -> AnalysisOutcome {
    let winner = match rule {
        SelectionRule::LongestSingleProject => records
            .iter()
            .min_by_key(|r| (Reverse(r.overlap_days), r.pair(), r.project_id))
            .map(OverlapRecord::pair),
        SelectionRule::LongestTotal => totals_by_pair(records)
            .into_iter()
            .min_by_key(|(pair, total)| (Reverse(*total), *pair))
            .map(|(pair, _)| pair),
    };

    match winner {
        Some(pair) => AnalysisOutcome::Winner(pair_report(records, pair)),
        None => AnalysisOutcome::NoOverlap,
    }
}

fn totals_by_pair(records: &[OverlapRecord]) -> BTreeMap<EmployeePair, i64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.pair()).or_insert(0) += record.overlap_days;
    }
    totals
}

/// Every record belonging to `pair`, in either id order, sorted by project.
pub fn pair_breakdown(records: &[OverlapRecord], pair: EmployeePair) -> Vec<OverlapRecord> {
    let mut projects: Vec<OverlapRecord> = records
        .iter()
        .filter(|r| r.pair() == pair)
        .copied()
        .collect();
    projects.sort_by_key(|r| (r.project_id, Reverse(r.overlap_days)));
    projects
}

fn pair_report(records: &[OverlapRecord], pair: EmployeePair) -> PairReport {
    let projects = pair_breakdown(records, pair);
    PairReport {
        pair,
        max_overlap_days: projects.iter().map(|r| r.overlap_days).max().unwrap_or(0),
        total_overlap_days: projects.iter().map(|r| r.overlap_days).sum(),
        projects,
    }
}
