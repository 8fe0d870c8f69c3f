//! Community statistics shown on the stats page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Issue, Status};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
    /// Share of reports resolved, between 0 and 1.
    pub resolution_rate: f64,
}

impl CommunityStats {
    pub fn resolved(&self) -> usize {
        self.by_status
            .get(Status::Resolved.key())
            .copied()
            .unwrap_or(0)
    }
}

pub fn compute(issues: &[Issue]) -> CommunityStats {
    let mut stats = CommunityStats {
        total: issues.len(),
        ..CommunityStats::default()
    };

    for status in Status::ALL {
        stats.by_status.insert(status.key().to_string(), 0);
    }

    for issue in issues {
        *stats
            .by_status
            .entry(issue.status.key().to_string())
            .or_default() += 1;
        *stats
            .by_category
            .entry(issue.category.to_string())
            .or_default() += 1;
        *stats
            .by_department
            .entry(issue.department.key().to_string())
            .or_default() += 1;
    }

    if stats.total > 0 {
        stats.resolution_rate = stats.resolved() as f64 / stats.total as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{IssueRepository, NewIssue, Store};
    use crate::types::{BilingualText, Category, Department};

    #[test]
    fn test_empty_store() {
        let stats = compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.resolution_rate, 0.0);
        assert_eq!(stats.by_status.get("pending"), Some(&0));
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_mixed_store() {
        let mut store = Store::in_memory();
        for (category, department) in [
            (Category::Roads, Department::Transportation),
            (Category::Roads, Department::Transportation),
            (Category::Sanitation, Department::Environment),
            (Category::Safety, Department::Health),
        ] {
            store.create(NewIssue {
                title: BilingualText::same("t"),
                description: BilingualText::same("d"),
                location: BilingualText::same("l"),
                category,
                department,
                user_id: "u1".to_string(),
                coordinates: None,
                attachments: Vec::new(),
            });
        }
        store.get_mut("1").unwrap().status = Status::Resolved;
        store.get_mut("2").unwrap().status = Status::InProgress;

        let stats = compute(store.list());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.resolved(), 1);
        assert_eq!(stats.by_status["pending"], 2);
        assert_eq!(stats.by_status["in-progress"], 1);
        assert_eq!(stats.by_category["Roads"], 2);
        assert_eq!(stats.by_department["environment"], 1);
        assert_eq!(stats.resolution_rate, 0.25);
    }
}
