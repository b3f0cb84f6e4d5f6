use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type EmployeeId = i64;
pub type ProjectId = i64;

/// One employee's tenure on one project. Fields are private so a record
/// cannot change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentRecord {
    employee_id: EmployeeId,
    project_id: ProjectId,
    date_from: NaiveDate,
    date_to: NaiveDate,
}

impl AssignmentRecord {
    pub fn new(
        employee_id: EmployeeId,
        project_id: ProjectId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            project_id,
            date_from,
            date_to,
        }
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }
}

/// Order-independent pair of employee ids, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeePair {
    pub low: EmployeeId,
    pub high: EmployeeId,
}

impl EmployeePair {
    pub fn new(a: EmployeeId, b: EmployeeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlapRecord {
    pub employee1_id: EmployeeId,
    pub employee2_id: EmployeeId,
    pub project_id: ProjectId,
    pub overlap_days: i64,
}

impl OverlapRecord {
    pub fn pair(&self) -> EmployeePair {
        EmployeePair::new(self.employee1_id, self.employee2_id)
    }
}

/// One shared project of the winning pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverlap {
    pub project_id: ProjectId,
    pub overlap_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    pub pair: EmployeePair,
    /// Largest single-project overlap of the pair.
    pub max_overlap_days: i64,
    pub total_overlap_days: i64,
    /// One entry per shared project, ordered by project id.
    pub projects: Vec<OverlapRecord>,
}

impl PairReport {
    pub fn shared_projects(&self) -> Vec<ProjectOverlap> {
        self.projects
            .iter()
            .map(|r| ProjectOverlap {
                project_id: r.project_id,
                overlap_days: r.overlap_days,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoOverlap,
    Winner(PairReport),
}

impl AnalysisOutcome {
    pub fn winner(&self) -> Option<&PairReport> {
        match self {
            AnalysisOutcome::Winner(report) => Some(report),
            AnalysisOutcome::NoOverlap => None,
        }
    }
}

/// What the transform phase hands to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub outcome: AnalysisOutcome,
    pub records_read: usize,
    pub groups_analyzed: usize,
    pub overlaps_found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_pair_is_order_independent() {
        assert_eq!(EmployeePair::new(7, 3), EmployeePair::new(3, 7));
        assert_eq!(EmployeePair::new(7, 3).low, 3);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(AnalysisOutcome::NoOverlap).unwrap();
        assert_eq!(json, serde_json::json!({"status": "no_overlap"}));
    }
}
