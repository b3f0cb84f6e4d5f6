use crate::core::grouping::{collaborating_groups, ProjectGroups};
use crate::domain::model::{AssignmentRecord, OverlapRecord};
use std::cmp::{max, min};

pub const DEFAULT_SWEEP_THRESHOLD: usize = 64;

/// How a single project group is scanned for overlapping pairs.
///
/// Every strategy yields the same set of records; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapStrategy {
    /// Compare every unordered pair, O(N²).
    AllPairs,
    /// Sort by start date and only compare intervals that can still intersect.
    SweepLine,
    /// All-pairs for small groups, sweep-line once a group exceeds the threshold.
    Auto { sweep_threshold: usize },
}

impl Default for OverlapStrategy {
    fn default() -> Self {
        OverlapStrategy::Auto {
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }
}

/// Strict intersection test: intervals that only touch do not overlap.
pub fn overlaps(a: &AssignmentRecord, b: &AssignmentRecord) -> bool {
    a.date_from() < b.date_to() && b.date_from() < a.date_to()
}

/// Whole days shared by both intervals, `None` when they do not overlap.
///
/// A zero-length interval strictly inside the other one passes the
/// intersection test and yields `Some(0)`.
pub fn overlap_days(a: &AssignmentRecord, b: &AssignmentRecord) -> Option<i64> {
    if !overlaps(a, b) {
        return None;
    }
    let start = max(a.date_from(), b.date_from());
    let end = min(a.date_to(), b.date_to());
    Some((end - start).num_days().max(0))
}

/// Two rows of the same employee on one project never form a pair.
fn overlap_record(first: &AssignmentRecord, second: &AssignmentRecord) -> Option<OverlapRecord> {
    if first.employee_id() == second.employee_id() {
        return None;
    }
    overlap_days(first, second).map(|days| OverlapRecord {
        employee1_id: first.employee_id(),
        employee2_id: second.employee_id(),
        project_id: first.project_id(),
        overlap_days: days,
    })
}

pub fn find_pair_overlaps(members: &[AssignmentRecord]) -> Vec<OverlapRecord> {
    let mut found = Vec::new();
    for (i, first) in members.iter().enumerate() {
        for second in &members[i + 1..] {
            if let Some(record) = overlap_record(first, second) {
                found.push(record);
            }
        }
    }
    found
}

pub fn sweep_pair_overlaps(members: &[AssignmentRecord]) -> Vec<OverlapRecord> {
    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by_key(|&i| (members[i].date_from(), i));

    let mut found = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        let current = &members[i];
        // Later starts never move backwards, so the scan can stop at the first
        // interval starting at or after the current end.
        for &j in order[pos + 1..]
            .iter()
            .take_while(|&&j| members[j].date_from() < current.date_to())
        {
            // Emit in input order so both strategies produce identical records.
            let (first, second) = if i < j { (i, j) } else { (j, i) };
            if let Some(record) = overlap_record(&members[first], &members[second]) {
                found.push(record);
            }
        }
    }
    found
}

pub fn find_group_overlaps(members: &[AssignmentRecord], strategy: OverlapStrategy) -> Vec<OverlapRecord> {
    match strategy {
        OverlapStrategy::AllPairs => find_pair_overlaps(members),
        OverlapStrategy::SweepLine => sweep_pair_overlaps(members),
        OverlapStrategy::Auto { sweep_threshold } if members.len() > sweep_threshold => {
            sweep_pair_overlaps(members)
        }
        OverlapStrategy::Auto { .. } => find_pair_overlaps(members),
    }
}

/// Total order over overlap records, independent of how groups were scheduled.
pub fn sort_overlaps(records: &mut [OverlapRecord]) {
    records.sort_by_key(|r| {
        let pair = r.pair();
        (r.project_id, pair.low, pair.high, r.overlap_days, r.employee1_id)
    });
}

/// Sequential fan-out over every project group followed by a deterministic merge.
pub fn find_all_overlaps(groups: &ProjectGroups, strategy: OverlapStrategy) -> Vec<OverlapRecord> {
    let mut merged: Vec<OverlapRecord> = collaborating_groups(groups)
        .flat_map(|(_, members)| find_group_overlaps(members, strategy))
        .collect();
    sort_overlaps(&mut merged);
    merged
}
