//! Issue repository and the other records kept next to it.
//!
//! Everything lives in one JSON snapshot (`issues.json`). Callers mutate the
//! in-memory copy and then call [`Store::save`].

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{ReporterError, Result};
use crate::location::Coordinates;
use crate::types::{
    Attachment, BilingualText, Category, Comment, Department, Draft, Issue, IssuePatch,
    ProblemReport, Status, Vote, VoteDirection,
};

/// Narrow interface over the issue collection.
pub trait IssueRepository {
    fn list(&self) -> &[Issue];
    fn get(&self, id: &str) -> Option<&Issue>;
    fn get_mut(&mut self, id: &str) -> Option<&mut Issue>;
    fn create(&mut self, issue: NewIssue) -> &Issue;
    fn update(&mut self, id: &str, patch: &IssuePatch) -> Option<&Issue>;
    fn delete(&mut self, id: &str) -> Option<Issue>;
}

/// Fields supplied when a report is submitted.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub title: BilingualText,
    pub description: BilingualText,
    pub location: BilingualText,
    pub category: Category,
    pub department: Department,
    pub user_id: String,
    pub coordinates: Option<Coordinates>,
    pub attachments: Vec<Attachment>,
}

#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    issues: Vec<Issue>,
    drafts: Vec<Draft>,
    comments: Vec<Comment>,
    votes: Vec<Vote>,
    problem_reports: Vec<ProblemReport>,
    /// Highest issue number handed out so far.
    last_issue_number: u64,
}

pub struct Store {
    path: Option<PathBuf>,
    data: Snapshot,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no issue store yet, starting empty");
            return Ok(Self {
                path: Some(path),
                data: Snapshot::default(),
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| ReporterError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        let data: Snapshot =
            serde_json::from_str(&contents).map_err(|e| ReporterError::DataParse {
                path: path.clone(),
                source: e,
            })?;

        tracing::debug!(issues = data.issues.len(), "loaded issue store");
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    /// A store that is never written to disk.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Snapshot::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReporterError::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(path, contents).map_err(|e| ReporterError::FileWrite {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "saved issue store");
        Ok(())
    }

    /// Numeric ids are never reused, even after the newest issue is deleted.
    fn next_issue_id(&mut self) -> String {
        let highest = self
            .data
            .issues
            .iter()
            .filter_map(|issue| issue.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.data.last_issue_number = self.data.last_issue_number.max(highest) + 1;
        self.data.last_issue_number.to_string()
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.data.drafts
    }

    pub fn add_draft(&mut self, draft: Draft) {
        self.data.drafts.push(draft);
    }

    pub fn remove_draft(&mut self, id: &str) -> Option<Draft> {
        let index = self.data.drafts.iter().position(|d| d.id == id)?;
        Some(self.data.drafts.remove(index))
    }

    /// Comments on one issue, oldest first.
    pub fn comments_for(&self, issue_id: &str) -> Vec<&Comment> {
        self.data
            .comments
            .iter()
            .filter(|c| c.issue_id == issue_id)
            .collect()
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.data.comments.push(comment);
    }

    pub fn vote_of(&self, issue_id: &str, user_id: &str) -> Option<VoteDirection> {
        self.data
            .votes
            .iter()
            .find(|v| v.issue_id == issue_id && v.user_id == user_id)
            .map(|v| v.direction)
    }

    /// Record or clear a user's vote.
    pub fn set_vote(&mut self, issue_id: &str, user_id: &str, direction: Option<VoteDirection>) {
        self.data
            .votes
            .retain(|v| !(v.issue_id == issue_id && v.user_id == user_id));

        if let Some(direction) = direction {
            self.data.votes.push(Vote {
                issue_id: issue_id.to_string(),
                user_id: user_id.to_string(),
                direction,
            });
        }
    }

    pub fn problem_reports(&self) -> &[ProblemReport] {
        &self.data.problem_reports
    }

    pub fn add_problem_report(&mut self, report: ProblemReport) {
        self.data.problem_reports.push(report);
    }
}

impl IssueRepository for Store {
    fn list(&self) -> &[Issue] {
        &self.data.issues
    }

    fn get(&self, id: &str) -> Option<&Issue> {
        self.data.issues.iter().find(|issue| issue.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.data.issues.iter_mut().find(|issue| issue.id == id)
    }

    fn create(&mut self, issue: NewIssue) -> &Issue {
        let created = Issue {
            id: self.next_issue_id(),
            title: issue.title,
            description: issue.description,
            location: issue.location,
            category: issue.category,
            department: issue.department,
            status: Status::Pending,
            date: Utc::now(),
            votes: 0,
            comments: 0,
            user_id: issue.user_id,
            coordinates: issue.coordinates,
            attachments: issue.attachments,
            rejection_reason: None,
        };

        self.data.issues.push(created);
        &self.data.issues[self.data.issues.len() - 1]
    }

    fn update(&mut self, id: &str, patch: &IssuePatch) -> Option<&Issue> {
        let issue = self.get_mut(id)?;
        patch.apply(issue);
        Some(&*issue)
    }

    fn delete(&mut self, id: &str) -> Option<Issue> {
        let index = self.data.issues.iter().position(|issue| issue.id == id)?;
        let removed = self.data.issues.remove(index);

        self.data.comments.retain(|c| c.issue_id != id);
        self.data.votes.retain(|v| v.issue_id != id);
        self.data.problem_reports.retain(|r| r.issue_id != id);
        Some(removed)
    }
}
