use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BilingualText, Category, Department, Issue};

/// A locally saved copy of an issue's editable fields. Drafts are never
/// turned into issues on their own.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub issue_id: Option<String>,
    pub title: BilingualText,
    pub description: BilingualText,
    pub location: BilingualText,
    pub category: Category,
    pub department: Department,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    pub fn snapshot(issue: &Issue, user_id: &str) -> Self {
        Self {
            id: format!("draft-{}", uuid::Uuid::new_v4().simple()),
            issue_id: Some(issue.id.clone()),
            title: issue.title.clone(),
            description: issue.description.clone(),
            location: issue.location.clone(),
            category: issue.category.clone(),
            department: issue.department.clone(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        }
    }
}
