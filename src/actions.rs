//! Permission-checked mutations on issues and the records attached to them.
//!
//! Every operation takes the acting user explicitly and returns an error
//! instead of silently doing nothing. Callers persist the store afterwards.

use std::fmt;

use chrono::Utc;

use crate::error::{ReporterError, Result};
use crate::i18n::Localized;
use crate::location::Coordinates;
use crate::store::{IssueRepository, NewIssue, Store};
use crate::types::{
    Attachment, Comment, Draft, Issue, IssuePatch, ProblemReport, Role, Status, User,
    VoteDirection,
};
use crate::validation::{self, ReportForm, MISSING_REPORT_FIELDS};

pub const REJECTION_REASON_REQUIRED: Localized = Localized::new(
    "Please provide a reason for rejection",
    "يرجى تقديم سبب الرفض",
);
pub const EMPTY_COMMENT: Localized = Localized::new(
    "Write a comment or give a rating",
    "اكتب تعليقًا أو أضف تقييمًا",
);
pub const INVALID_RATING: Localized = Localized::new(
    "Rating must be between 1 and 5 stars",
    "يجب أن يكون التقييم بين 1 و 5 نجوم",
);
pub const EMPTY_PROBLEM_DESCRIPTION: Localized = Localized::new(
    "Please describe the problem",
    "يرجى وصف المشكلة",
);

/// Something a user may be refused permission to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
    ChangeStatus,
    SubmitReport,
    DiscardDraft,
}

impl Action {
    pub fn label(self) -> Localized {
        match self {
            Action::Edit => Localized::new("edit this issue", "تعديل هذه المشكلة"),
            Action::Delete => Localized::new("delete this issue", "حذف هذه المشكلة"),
            Action::ChangeStatus => {
                Localized::new("change the status of this issue", "تغيير حالة هذه المشكلة")
            }
            Action::SubmitReport => Localized::new("submit reports", "تقديم البلاغات"),
            Action::DiscardDraft => Localized::new("discard this draft", "حذف هذه المسودة"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().en)
    }
}

/// The owner and any government user may edit or delete an issue.
pub fn can_modify(issue: &Issue, actor: Option<&User>) -> bool {
    actor.is_some_and(|user| user.id == issue.user_id || user.is_government())
}

fn signed_in(actor: Option<&User>) -> Result<&User> {
    actor.ok_or(ReporterError::LoginRequired)
}

fn find<'a>(store: &'a Store, id: &str) -> Result<&'a Issue> {
    store
        .get(id)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))
}

fn find_mut<'a>(store: &'a mut Store, id: &str) -> Result<&'a mut Issue> {
    store
        .get_mut(id)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))
}

fn ensure_can_modify(store: &Store, id: &str, actor: Option<&User>, action: Action) -> Result<()> {
    signed_in(actor)?;
    let issue = find(store, id)?;
    if can_modify(issue, actor) {
        Ok(())
    } else {
        Err(ReporterError::Forbidden(action))
    }
}

pub fn edit<'a>(
    store: &'a mut Store,
    id: &str,
    patch: &IssuePatch,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    ensure_can_modify(store, id, actor, Action::Edit)?;
    validation::patch(patch)?;
    tracing::info!(issue = id, "editing issue");
    store
        .update(id, patch)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))
}

pub fn delete(store: &mut Store, id: &str, actor: Option<&User>) -> Result<Issue> {
    ensure_can_modify(store, id, actor, Action::Delete)?;
    tracing::info!(issue = id, "deleting issue");
    store
        .delete(id)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))
}

/// Save the issue, with any pending edits applied, as a new draft owned by
/// the actor. The issue itself is left untouched.
pub fn save_draft<'a>(
    store: &'a mut Store,
    id: &str,
    patch: &IssuePatch,
    actor: Option<&User>,
) -> Result<&'a Draft> {
    let user = signed_in(actor)?;
    validation::patch(patch)?;
    let mut edited = find(store, id)?.clone();
    patch.apply(&mut edited);

    let draft = Draft::snapshot(&edited, &user.id);
    tracing::info!(issue = id, draft = %draft.id, "saved draft");
    store.add_draft(draft);

    let drafts = store.drafts();
    Ok(&drafts[drafts.len() - 1])
}

pub fn drafts_for<'a>(store: &'a Store, user: &User) -> Vec<&'a Draft> {
    store
        .drafts()
        .iter()
        .filter(|draft| draft.user_id == user.id)
        .collect()
}

pub fn discard_draft(store: &mut Store, id: &str, actor: Option<&User>) -> Result<Draft> {
    let user = signed_in(actor)?;
    let draft = store
        .drafts()
        .iter()
        .find(|draft| draft.id == id)
        .ok_or_else(|| ReporterError::DraftNotFound(id.to_string()))?;

    if draft.user_id != user.id {
        return Err(ReporterError::Forbidden(Action::DiscardDraft));
    }

    store
        .remove_draft(id)
        .ok_or_else(|| ReporterError::DraftNotFound(id.to_string()))
}

/// File a new report. Only regular users submit reports.
pub fn submit_report<'a>(
    store: &'a mut Store,
    form: &ReportForm,
    coordinates: Option<Coordinates>,
    attachments: Vec<Attachment>,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    let user = signed_in(actor)?;
    if user.role() != Role::Regular {
        return Err(ReporterError::Forbidden(Action::SubmitReport));
    }
    form.validate()?;

    let (Some(category), Some(department)) = (form.category.clone(), form.department.clone())
    else {
        return Err(ReporterError::Validation(MISSING_REPORT_FIELDS));
    };

    let issue = store.create(NewIssue {
        title: form.title_text(),
        description: form.description_text(),
        location: form.location_text(),
        category,
        department,
        user_id: user.id.clone(),
        coordinates,
        attachments,
    });
    tracing::info!(issue = %issue.id, "report submitted");
    Ok(issue)
}

fn transition<'a>(
    store: &'a mut Store,
    id: &str,
    target: Status,
    reason: Option<String>,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    let user = signed_in(actor)?;
    if !user.is_government() {
        return Err(ReporterError::Forbidden(Action::ChangeStatus));
    }

    let issue = find_mut(store, id)?;
    if !issue.status.can_transition_to(&target) {
        return Err(ReporterError::InvalidTransition {
            from: issue.status.clone(),
            to: target,
        });
    }

    tracing::info!(issue = id, from = %issue.status, to = %target, "status changed");
    issue.status = target;
    issue.rejection_reason = reason;
    Ok(&*issue)
}

pub fn approve<'a>(store: &'a mut Store, id: &str, actor: Option<&User>) -> Result<&'a Issue> {
    transition(store, id, Status::InProgress, None, actor)
}

pub fn reject<'a>(
    store: &'a mut Store,
    id: &str,
    reason: &str,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ReporterError::Validation(REJECTION_REASON_REQUIRED));
    }
    transition(store, id, Status::Rejected, Some(reason.to_string()), actor)
}

/// Return an issue to pending. Any rejection reason is cleared.
pub fn revert<'a>(store: &'a mut Store, id: &str, actor: Option<&User>) -> Result<&'a Issue> {
    transition(store, id, Status::Pending, None, actor)
}

pub fn resolve<'a>(store: &'a mut Store, id: &str, actor: Option<&User>) -> Result<&'a Issue> {
    transition(store, id, Status::Resolved, None, actor)
}

/// Add a comment, a star rating, or both.
pub fn comment<'a>(
    store: &'a mut Store,
    id: &str,
    body: Option<&str>,
    rating: Option<u8>,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    let user = signed_in(actor)?;
    let body = body.map(str::trim).filter(|b| !b.is_empty());

    if let Some(rating) = rating {
        if !(1..=5).contains(&rating) {
            return Err(ReporterError::Validation(INVALID_RATING));
        }
    }
    if body.is_none() && rating.is_none() {
        return Err(ReporterError::Validation(EMPTY_COMMENT));
    }

    let issue = find_mut(store, id)?;
    issue.comments = issue.comments.saturating_add(1);

    store.add_comment(Comment {
        id: uuid::Uuid::new_v4().simple().to_string(),
        issue_id: id.to_string(),
        user_id: user.id.clone(),
        author: Some(user.display_name().to_string()),
        body: body.map(str::to_string),
        rating,
        created_at: Utc::now(),
    });
    tracing::info!(issue = id, "comment added");

    find(store, id)
}

/// Toggle the actor's vote. Repeating a vote removes it. Only an `up`
/// vote counts towards the issue total.
pub fn vote<'a>(
    store: &'a mut Store,
    id: &str,
    direction: VoteDirection,
    actor: Option<&User>,
) -> Result<&'a Issue> {
    let user = signed_in(actor)?;
    find(store, id)?;

    let previous = store.vote_of(id, &user.id);
    let next = if previous == Some(direction) {
        None
    } else {
        Some(direction)
    };
    store.set_vote(id, &user.id, next);

    let issue = find_mut(store, id)?;
    match (previous, next) {
        (Some(VoteDirection::Up), _) => issue.votes = issue.votes.saturating_sub(1),
        (_, Some(VoteDirection::Up)) => issue.votes = issue.votes.saturating_add(1),
        _ => {}
    }
    tracing::debug!(issue = id, ?next, votes = issue.votes, "vote recorded");
    Ok(&*issue)
}

/// Flag a problem with an existing report. Anonymous visitors may do this.
pub fn report_problem<'a>(
    store: &'a mut Store,
    id: &str,
    description: &str,
    actor: Option<&User>,
) -> Result<&'a ProblemReport> {
    find(store, id)?;
    let description = description.trim();
    if description.is_empty() {
        return Err(ReporterError::Validation(EMPTY_PROBLEM_DESCRIPTION));
    }

    store.add_problem_report(ProblemReport {
        id: uuid::Uuid::new_v4().simple().to_string(),
        issue_id: id.to_string(),
        user_id: actor.map(|user| user.id.clone()),
        description: description.to_string(),
        created_at: Utc::now(),
    });
    tracing::info!(issue = id, "problem reported");

    let reports = store.problem_reports();
    Ok(&reports[reports.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BilingualText, Category, Department};

    fn owner() -> User {
        User::regular("owner", "owner@mail.com")
    }

    fn stranger() -> User {
        User::regular("stranger", "other@mail.com")
    }

    fn official() -> User {
        User::government("gov", "EMP-1", Department::PublicWorks)
    }

    fn store_with_issue() -> Store {
        let mut store = Store::in_memory();
        store.create(NewIssue {
            title: BilingualText::new("Broken bench", "مقعد مكسور"),
            description: BilingualText::same("Bench in the park is broken"),
            location: BilingualText::same("Park"),
            category: Category::PublicSpaces,
            department: Department::PublicWorks,
            user_id: "owner".to_string(),
            coordinates: None,
            attachments: Vec::new(),
        });
        store
    }

    fn title_patch(title: &str) -> IssuePatch {
        IssuePatch {
            title_en: Some(title.to_string()),
            ..IssuePatch::default()
        }
    }

    #[test]
    fn test_owner_and_government_may_edit() {
        let mut store = store_with_issue();
        let edited = edit(&mut store, "1", &title_patch("Fixed title"), Some(&owner())).unwrap();
        assert_eq!(edited.title.en, "Fixed title");
        assert_eq!(edited.title.ar, "مقعد مكسور");

        let edited = edit(&mut store, "1", &title_patch("Gov title"), Some(&official())).unwrap();
        assert_eq!(edited.title.en, "Gov title");
    }

    #[test]
    fn test_edit_is_refused_explicitly() {
        let mut store = store_with_issue();
        assert!(matches!(
            edit(&mut store, "1", &title_patch("x"), Some(&stranger())),
            Err(ReporterError::Forbidden(Action::Edit))
        ));
        assert!(matches!(
            edit(&mut store, "1", &title_patch("x"), None),
            Err(ReporterError::LoginRequired)
        ));
        assert!(matches!(
            edit(&mut store, "9", &title_patch("x"), Some(&owner())),
            Err(ReporterError::IssueNotFound(id)) if id == "9"
        ));
        assert_eq!(store.get("1").unwrap().title.en, "Broken bench");
    }

    #[test]
    fn test_edit_and_draft_keep_category_and_department_in_lists() {
        let mut store = store_with_issue();
        let unknown_category = IssuePatch {
            category: Some("Zzz".parse().unwrap()),
            ..IssuePatch::default()
        };
        assert!(matches!(
            edit(&mut store, "1", &unknown_category, Some(&owner())),
            Err(ReporterError::Validation(_))
        ));
        assert!(matches!(
            save_draft(&mut store, "1", &unknown_category, Some(&owner())),
            Err(ReporterError::Validation(_))
        ));

        let unknown_department = IssuePatch {
            department: Some("Municipality".parse().unwrap()),
            ..IssuePatch::default()
        };
        assert!(matches!(
            edit(&mut store, "1", &unknown_department, Some(&official())),
            Err(ReporterError::Validation(_))
        ));

        let issue = store.get("1").unwrap();
        assert_eq!(issue.category, Category::PublicSpaces);
        assert_eq!(issue.department, Department::PublicWorks);
        assert!(store.drafts().is_empty());
    }

    #[test]
    fn test_delete() {
        let mut store = store_with_issue();
        assert!(matches!(
            delete(&mut store, "1", Some(&stranger())),
            Err(ReporterError::Forbidden(Action::Delete))
        ));
        let removed = delete(&mut store, "1", Some(&owner())).unwrap();
        assert_eq!(removed.id, "1");
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_save_draft_leaves_issue_untouched() {
        let mut store = store_with_issue();
        assert!(matches!(
            save_draft(&mut store, "1", &IssuePatch::default(), None),
            Err(ReporterError::LoginRequired)
        ));

        let draft = save_draft(&mut store, "1", &title_patch("Draft title"), Some(&owner()))
            .unwrap()
            .clone();
        assert!(draft.id.starts_with("draft-"));
        assert_eq!(draft.issue_id.as_deref(), Some("1"));
        assert_eq!(draft.title.en, "Draft title");
        assert_eq!(store.get("1").unwrap().title.en, "Broken bench");

        let second = save_draft(&mut store, "1", &IssuePatch::default(), Some(&owner()))
            .unwrap()
            .clone();
        assert_ne!(draft.id, second.id);
        assert_eq!(drafts_for(&store, &owner()).len(), 2);
        assert!(drafts_for(&store, &stranger()).is_empty());
    }

    #[test]
    fn test_discard_draft_only_by_owner() {
        let mut store = store_with_issue();
        let id = save_draft(&mut store, "1", &IssuePatch::default(), Some(&owner()))
            .unwrap()
            .id
            .clone();

        assert!(matches!(
            discard_draft(&mut store, &id, Some(&stranger())),
            Err(ReporterError::Forbidden(Action::DiscardDraft))
        ));
        assert_eq!(discard_draft(&mut store, &id, Some(&owner())).unwrap().id, id);
        assert!(matches!(
            discard_draft(&mut store, &id, Some(&owner())),
            Err(ReporterError::DraftNotFound(_))
        ));
    }

    #[test]
    fn test_submit_report() {
        let mut store = Store::in_memory();
        let form = ReportForm {
            title: "Water leak".to_string(),
            description: "Pipe leaking on the corner".to_string(),
            location: "Jabal Amman".to_string(),
            category: Some(Category::Utilities),
            department: Some(Department::WaterAuthority),
        };

        assert!(matches!(
            submit_report(&mut store, &form, None, Vec::new(), Some(&official())),
            Err(ReporterError::Forbidden(Action::SubmitReport))
        ));

        let issue = submit_report(&mut store, &form, None, Vec::new(), Some(&owner())).unwrap();
        assert_eq!(issue.status, Status::Pending);
        assert_eq!(issue.votes, 0);
        assert_eq!(issue.comments, 0);
        assert_eq!(issue.user_id, "owner");
        assert_eq!(issue.title.ar, "Water leak");

        let incomplete = ReportForm {
            category: None,
            ..form
        };
        assert!(matches!(
            submit_report(&mut store, &incomplete, None, Vec::new(), Some(&owner())),
            Err(ReporterError::Validation(_))
        ));

        let bridges = ReportForm {
            category: Some("Bridges".parse().unwrap()),
            department: Some("Municipality".parse().unwrap()),
            ..incomplete
        };
        assert!(matches!(
            submit_report(&mut store, &bridges, None, Vec::new(), Some(&owner())),
            Err(ReporterError::Validation(_))
        ));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_status_transitions() {
        let mut store = store_with_issue();
        let gov = official();

        assert!(matches!(
            approve(&mut store, "1", Some(&owner())),
            Err(ReporterError::Forbidden(Action::ChangeStatus))
        ));
        assert!(matches!(
            resolve(&mut store, "1", Some(&gov)),
            Err(ReporterError::InvalidTransition { .. })
        ));

        assert_eq!(approve(&mut store, "1", Some(&gov)).unwrap().status, Status::InProgress);
        assert_eq!(resolve(&mut store, "1", Some(&gov)).unwrap().status, Status::Resolved);
        assert!(revert(&mut store, "1", Some(&gov)).is_err());
    }

    #[test]
    fn test_reject_needs_reason_and_revert_clears_it() {
        let mut store = store_with_issue();
        let gov = official();

        assert!(matches!(
            reject(&mut store, "1", "  ", Some(&gov)),
            Err(ReporterError::Validation(m)) if m == REJECTION_REASON_REQUIRED
        ));

        let rejected = reject(&mut store, "1", "Duplicate report", Some(&gov)).unwrap();
        assert_eq!(rejected.status, Status::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Duplicate report"));

        let reverted = revert(&mut store, "1", Some(&gov)).unwrap();
        assert_eq!(reverted.status, Status::Pending);
        assert!(reverted.rejection_reason.is_none());
    }

    #[test]
    fn test_comment_rules() {
        let mut store = store_with_issue();
        let user = stranger();

        assert!(matches!(
            comment(&mut store, "1", Some("   "), None, Some(&user)),
            Err(ReporterError::Validation(m)) if m == EMPTY_COMMENT
        ));
        assert!(matches!(
            comment(&mut store, "1", None, Some(6), Some(&user)),
            Err(ReporterError::Validation(m)) if m == INVALID_RATING
        ));
        assert!(matches!(
            comment(&mut store, "1", Some("hi"), None, None),
            Err(ReporterError::LoginRequired)
        ));

        comment(&mut store, "1", Some("Same here"), None, Some(&user)).unwrap();
        let issue = comment(&mut store, "1", None, Some(4), Some(&user)).unwrap();
        assert_eq!(issue.comments, 2);

        let comments = store.comments_for("1");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body.as_deref(), Some("Same here"));
        assert_eq!(comments[1].rating, Some(4));
    }

    #[test]
    fn test_vote_toggles() {
        let mut store = store_with_issue();
        let user = stranger();

        assert_eq!(vote(&mut store, "1", VoteDirection::Up, Some(&user)).unwrap().votes, 1);
        assert_eq!(vote(&mut store, "1", VoteDirection::Up, Some(&user)).unwrap().votes, 0);
        assert_eq!(store.vote_of("1", &user.id), None);

        vote(&mut store, "1", VoteDirection::Up, Some(&user)).unwrap();
        let issue = vote(&mut store, "1", VoteDirection::Down, Some(&user)).unwrap();
        assert_eq!(issue.votes, 0);
        assert_eq!(store.vote_of("1", &user.id), Some(VoteDirection::Down));

        assert_eq!(vote(&mut store, "1", VoteDirection::Down, Some(&user)).unwrap().votes, 0);
        assert_eq!(store.vote_of("1", &user.id), None);
    }

    #[test]
    fn test_report_problem() {
        let mut store = store_with_issue();
        assert!(matches!(
            report_problem(&mut store, "7", "dup", None),
            Err(ReporterError::IssueNotFound(_))
        ));
        assert!(report_problem(&mut store, "1", "", None).is_err());

        let report = report_problem(&mut store, "1", "Already fixed", None).unwrap();
        assert!(report.user_id.is_none());
        assert_eq!(store.problem_reports().len(), 1);
    }
}
