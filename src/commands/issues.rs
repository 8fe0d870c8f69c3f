use std::collections::BTreeSet;

use colored::Colorize;
use tabled::Tabled;

use crate::actions::{self, Action};
use crate::cli::{IssueEditArgs, IssueListArgs, ReportArgs};
use crate::error::{ReporterError, Result};
use crate::filter::{self, IssueFilter};
use crate::i18n::{labels, Language, Localized};
use crate::location;
use crate::output::{self, format_date, format_relative, status_colored, truncate};
use crate::routes::Route;
use crate::store::IssueRepository;
use crate::types::{Attachment, Issue, IssuePatch, VoteDirection};
use crate::validation::{self, ReportForm};

use super::{confirm, Context};

const NO_ISSUES: Localized = Localized::new("No issues found.", "لم يتم العثور على مشاكل.");
const NO_REPORTS: Localized = Localized::new(
    "You have not reported any issues yet.",
    "لم تقم بالإبلاغ عن أي مشكلة بعد.",
);
const NO_CHANGES: Localized = Localized::new("No changes specified.", "لم يتم تحديد أي تغييرات.");
const UPDATED: Localized = Localized::new("Issue updated.", "تم تحديث المشكلة.");
const DELETED: Localized = Localized::new("Issue deleted.", "تم حذف المشكلة.");
const CONFIRM_DELETE: Localized = Localized::new(
    "Are you sure you want to delete this issue?",
    "هل أنت متأكد أنك تريد حذف هذه المشكلة؟",
);
const ABORTED: Localized = Localized::new("Aborted.", "تم الإلغاء.");
const DRAFT_SAVED: Localized = Localized::new("Saved as draft", "تم الحفظ كمسودة");
const REPORTED: Localized = Localized::new(
    "Issue reported successfully. Reference number:",
    "تم الإبلاغ عن المشكلة بنجاح. الرقم المرجعي:",
);
const SKIPPED_FILE: Localized = Localized::new("Skipped", "تم تخطي");
const PROBLEM_REPORTED: Localized = Localized::new(
    "Thank you. The problem has been reported.",
    "شكرًا لك. تم الإبلاغ عن المشكلة.",
);
const YOU_VOTED: Localized = Localized::new("you voted", "صوّتّ");
const IMAGE: Localized = Localized::new("image", "صورة");
const FILE: Localized = Localized::new("file", "ملف");
const EDITABLE: Localized = Localized::new(
    "You can edit or delete this issue.",
    "يمكنك تعديل هذه المشكلة أو حذفها.",
);

/// A government review decision on an issue.
pub enum Decision {
    Approve,
    Reject(String),
    Revert,
    Resolve,
}

impl Decision {
    fn done(&self) -> Localized {
        match self {
            Decision::Approve => Localized::new("Issue approved.", "تمت الموافقة على المشكلة."),
            Decision::Reject(_) => Localized::new("Issue rejected.", "تم رفض المشكلة."),
            Decision::Revert => Localized::new(
                "Issue returned to pending.",
                "تمت إعادة المشكلة إلى قيد الانتظار.",
            ),
            Decision::Resolve => {
                Localized::new("Issue marked as resolved.", "تم تحديد المشكلة كمحلولة.")
            }
        }
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Votes")]
    votes: u32,
    #[tabled(rename = "Reported")]
    reported: String,
}

impl IssueRow {
    fn new(issue: &Issue, language: Language) -> Self {
        Self {
            id: issue.id.clone(),
            title: truncate(issue.title.get(language), 40),
            category: issue.category.label(language).to_string(),
            department: issue.department.label(language).to_string(),
            status: status_colored(&issue.status, language),
            votes: issue.votes,
            reported: format_relative(issue.date, language),
        }
    }
}

impl From<IssueListArgs> for IssueFilter {
    fn from(args: IssueListArgs) -> Self {
        Self {
            search_text: args.search.unwrap_or_default(),
            categories: args.category.into_iter().collect::<BTreeSet<_>>(),
            statuses: args.status.into_iter().collect(),
            departments: args.department.into_iter().collect(),
        }
    }
}

impl From<IssueEditArgs> for IssuePatch {
    fn from(args: IssueEditArgs) -> Self {
        Self {
            title_en: args.title_en,
            title_ar: args.title_ar,
            description_en: args.description_en,
            description_ar: args.description_ar,
            location_en: args.location_en,
            location_ar: args.location_ar,
            category: args.category,
            department: args.department,
        }
    }
}

fn print_issues(ctx: &Context, issues: &[&Issue], empty: Localized) {
    if issues.is_empty() {
        output::print_message(ctx.text(empty));
        return;
    }

    let language = ctx.language;
    output::print_table(issues, |issue| IssueRow::new(issue, language));
}

pub fn list(ctx: &Context, args: IssueListArgs) -> Result<()> {
    if !ctx.guard(&Route::Issues) {
        return Ok(());
    }

    let selection = IssueFilter::from(args);
    let user = ctx.session.current();
    if user.is_some_and(|u| u.is_government()) && !selection.departments.is_empty() {
        tracing::debug!("department selection ignored for government user");
    }

    let visible = filter::filter(ctx.store.list(), &selection, user, ctx.language);
    print_issues(ctx, &visible, NO_ISSUES);
    Ok(())
}

pub fn my_reports(ctx: &Context) -> Result<()> {
    if !ctx.guard(&Route::MyReports) {
        return Ok(());
    }
    let Some(user) = ctx.session.current() else {
        return Ok(());
    };

    let mine: Vec<&Issue> = ctx
        .store
        .list()
        .iter()
        .filter(|issue| issue.user_id == user.id)
        .collect();
    print_issues(ctx, &mine, NO_REPORTS);
    Ok(())
}

fn print_attachment(attachment: &Attachment, lang: Language) {
    let kind = (if attachment.is_image() { IMAGE } else { FILE }).get(lang);
    println!(
        "  - {} ({kind}, {} KB)",
        attachment.file_name,
        attachment.size.div_ceil(1024)
    );
}

pub fn view(ctx: &Context, id: &str) -> Result<()> {
    let issue = ctx
        .store
        .get(id)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))?;
    let lang = ctx.language;
    let user = ctx.session.current();
    let my_vote = user.and_then(|u| ctx.store.vote_of(id, &u.id));
    let editable = actions::can_modify(issue, user);

    output::print_item(issue, |issue| {
        println!("#{} - {}", issue.id, issue.title.get(lang).bold());
        println!();
        println!("{}", issue.description.get(lang));
        println!();
        let label = |text: Localized| text.get(lang);
        println!("{:<12}{}", label(labels::STATUS), status_colored(&issue.status, lang));
        if let Some(reason) = &issue.rejection_reason {
            println!("{:<12}{reason}", label(labels::REASON));
        }
        println!("{:<12}{}", label(labels::CATEGORY), issue.category.label(lang));
        println!("{:<12}{}", label(labels::DEPARTMENT), issue.department.label(lang));
        println!("{:<12}{}", label(labels::LOCATION), issue.location.get(lang));
        if let Some(coordinates) = &issue.coordinates {
            println!("{:<12}{coordinates}", label(labels::MAP));
        }
        println!(
            "{:<12}{} ({})",
            label(labels::REPORTED),
            format_date(issue.date),
            format_relative(issue.date, lang)
        );
        let vote = my_vote
            .map(|direction| format!(" ({} {direction})", label(YOU_VOTED)))
            .unwrap_or_default();
        println!("{:<12}{}{vote}", label(labels::VOTES), issue.votes);
        println!("{:<12}{}", label(labels::COMMENTS), issue.comments);

        if !issue.attachments.is_empty() {
            println!();
            println!("{}", label(labels::ATTACHMENTS));
            for attachment in &issue.attachments {
                print_attachment(attachment, lang);
            }
        }

        if editable {
            println!();
            println!("{}", label(EDITABLE).bright_black());
        }
    });
    Ok(())
}

pub fn edit(ctx: &mut Context, args: IssueEditArgs) -> Result<()> {
    let id = args.id.clone();
    let patch = IssuePatch::from(args);
    if patch.is_empty() {
        output::print_message(ctx.text(NO_CHANGES));
        return Ok(());
    }

    actions::edit(&mut ctx.store, &id, &patch, ctx.session.current())?;
    ctx.store.save()?;
    output::print_message(ctx.text(UPDATED));
    Ok(())
}

pub fn save_draft(ctx: &mut Context, args: IssueEditArgs) -> Result<()> {
    let id = args.id.clone();
    let patch = IssuePatch::from(args);

    let draft_id = actions::save_draft(&mut ctx.store, &id, &patch, ctx.session.current())?
        .id
        .clone();
    ctx.store.save()?;
    output::print_message(&format!("{}: {draft_id}", ctx.text(DRAFT_SAVED)));
    Ok(())
}

pub fn delete(ctx: &mut Context, id: &str, yes: bool) -> Result<()> {
    // Permission errors surface before the prompt.
    let user = ctx.session.current().ok_or(ReporterError::LoginRequired)?;
    let issue = ctx
        .store
        .get(id)
        .ok_or_else(|| ReporterError::IssueNotFound(id.to_string()))?;
    if !actions::can_modify(issue, Some(user)) {
        return Err(ReporterError::Forbidden(Action::Delete));
    }

    if !yes && !confirm(ctx.text(CONFIRM_DELETE))? {
        output::print_message(ctx.text(ABORTED));
        return Ok(());
    }

    actions::delete(&mut ctx.store, id, ctx.session.current())?;
    ctx.store.save()?;
    output::print_message(ctx.text(DELETED));
    Ok(())
}

pub fn decide(ctx: &mut Context, id: &str, decision: Decision) -> Result<()> {
    let actor = ctx.session.current();
    let store = &mut ctx.store;

    let issue = match &decision {
        Decision::Approve => actions::approve(store, id, actor)?,
        Decision::Reject(reason) => actions::reject(store, id, reason, actor)?,
        Decision::Revert => actions::revert(store, id, actor)?,
        Decision::Resolve => actions::resolve(store, id, actor)?,
    };
    let status = status_colored(&issue.status, ctx.language);

    ctx.store.save()?;
    output::print_message(&format!("{} ({status})", ctx.text(decision.done())));
    Ok(())
}

pub fn vote(ctx: &mut Context, id: &str, direction: VoteDirection) -> Result<()> {
    let votes = actions::vote(&mut ctx.store, id, direction, ctx.session.current())?.votes;
    ctx.store.save()?;
    output::print_message(&format!("{} {votes}", ctx.text(labels::VOTES)));
    Ok(())
}

pub fn report_problem(ctx: &mut Context, id: &str, description: &str) -> Result<()> {
    actions::report_problem(&mut ctx.store, id, description, ctx.session.current())?;
    ctx.store.save()?;
    output::print_message(ctx.text(PROBLEM_REPORTED));
    Ok(())
}

/// Validate each file. Rejected files are reported and left out.
fn collect_attachments(ctx: &Context, args: &ReportArgs) -> Vec<Attachment> {
    args.photo
        .iter()
        .filter_map(|path| match validation::attachment(path) {
            Ok(attachment) => Some(attachment),
            Err(err) => {
                eprintln!(
                    "{} {}: {}",
                    ctx.text(SKIPPED_FILE),
                    path.display(),
                    err.localized(ctx.language)
                );
                None
            }
        })
        .collect()
}

pub fn report(ctx: &mut Context, args: ReportArgs) -> Result<()> {
    if !ctx.guard(&Route::Report) {
        return Ok(());
    }

    let coordinates = if args.here {
        let position = location::current_position(&ctx.config).map_err(|reason| {
            tracing::warn!(code = reason.code(), "current location unavailable");
            ReporterError::Location(reason)
        })?;
        Some(position)
    } else {
        args.coords
    };
    let attachments = collect_attachments(ctx, &args);

    let form = ReportForm {
        title: args.title.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        category: args.category,
        department: args.department,
    };

    let id = actions::submit_report(
        &mut ctx.store,
        &form,
        coordinates,
        attachments,
        ctx.session.current(),
    )?
    .id
    .clone();
    ctx.store.save()?;
    output::print_message(&format!("{} {id}", ctx.text(REPORTED)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Department, Status};

    #[test]
    fn test_list_args_become_filter() {
        let args = IssueListArgs {
            search: Some("leak".to_string()),
            category: vec![Category::Utilities, Category::Utilities],
            status: vec!["in-progress".parse().unwrap()],
            department: vec![Department::WaterAuthority],
        };
        let selection = IssueFilter::from(args);
        assert_eq!(selection.search_text, "leak");
        assert_eq!(selection.categories.len(), 1);
        assert!(selection.statuses.contains(&Status::InProgress));
        assert!(IssueFilter::from(IssueListArgs::default()).is_empty());
    }

    #[test]
    fn test_edit_args_become_patch() {
        let args = IssueEditArgs {
            id: "3".to_string(),
            title_en: None,
            title_ar: Some("عنوان".to_string()),
            description_en: None,
            description_ar: None,
            location_en: None,
            location_ar: None,
            category: None,
            department: None,
        };
        let patch = IssuePatch::from(args);
        assert!(!patch.is_empty());
        assert_eq!(patch.title_ar.as_deref(), Some("عنوان"));
    }
}
