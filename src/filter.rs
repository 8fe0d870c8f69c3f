//! Issue search and filtering for the issues list.

use std::collections::BTreeSet;

use crate::i18n::Language;
use crate::types::{Category, Department, Issue, Role, Status, User};

/// Filter state chosen in the issues list. Empty sets do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub search_text: String,
    pub categories: BTreeSet<Category>,
    pub statuses: BTreeSet<Status>,
    pub departments: BTreeSet<Department>,
}

impl IssueFilter {
    pub fn is_empty(&self) -> bool {
        *self == IssueFilter::default()
    }

    /// Whether `issue` is visible to `user` under this filter.
    ///
    /// Text matches title, description and location in `language` only.
    /// For government users the department selection is replaced by their
    /// own department.
    pub fn matches(&self, issue: &Issue, user: Option<&User>, language: Language) -> bool {
        self.matches_search(issue, language)
            && member(&self.categories, &issue.category)
            && member(&self.statuses, &issue.status)
            && self.matches_department(issue, user)
    }

    fn matches_search(&self, issue: &Issue, language: Language) -> bool {
        if self.search_text.is_empty() {
            return true;
        }

        let needle = self.search_text.to_lowercase();
        [&issue.title, &issue.description, &issue.location]
            .into_iter()
            .any(|text| text.get(language).to_lowercase().contains(&needle))
    }

    fn matches_department(&self, issue: &Issue, user: Option<&User>) -> bool {
        match user {
            Some(user) if user.role() == Role::Government => {
                user.department().is_some_and(|own| *own == issue.department)
            }
            _ => member(&self.departments, &issue.department),
        }
    }
}

fn member<T: Ord>(selected: &BTreeSet<T>, value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Visible issues in their original order.
pub fn filter<'a>(
    issues: &'a [Issue],
    filter: &IssueFilter,
    user: Option<&User>,
    language: Language,
) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| filter.matches(issue, user, language))
        .collect()
}
