use crate::domain::model::{AssignmentRecord, ProjectId};
use std::collections::BTreeMap;

pub type ProjectGroups = BTreeMap<ProjectId, Vec<AssignmentRecord>>;

/// Buckets assignments by project id, keeping input order inside each bucket.
pub fn group_by_project(records: &[AssignmentRecord]) -> ProjectGroups {
    let mut groups = ProjectGroups::new();
    for record in records {
        groups.entry(record.project_id()).or_default().push(*record);
    }
    groups
}

/// Groups that can produce at least one pair.
pub fn collaborating_groups(
    groups: &ProjectGroups,
) -> impl Iterator<Item = (ProjectId, &[AssignmentRecord])> + '_ {
    groups
        .iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(project_id, members)| (*project_id, members.as_slice()))
}
