use tabled::Tabled;

use crate::actions;
use crate::error::{ReporterError, Result};
use crate::i18n::{labels, Language, Localized};
use crate::output::{self, format_date, format_relative, truncate};
use crate::types::Draft;

use super::Context;

const NO_DRAFTS: Localized = Localized::new("You have no saved drafts.", "لا توجد مسودات محفوظة.");
const DISCARDED: Localized = Localized::new("Draft discarded.", "تم حذف المسودة.");

#[derive(Tabled)]
struct DraftRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Saved")]
    saved: String,
}

impl DraftRow {
    fn new(draft: &Draft, language: Language) -> Self {
        Self {
            id: draft.id.clone(),
            issue: draft.issue_id.clone().unwrap_or_else(|| "-".to_string()),
            title: truncate(draft.title.get(language), 40),
            saved: format_relative(draft.created_at, language),
        }
    }
}

pub fn list(ctx: &Context) -> Result<()> {
    let user = ctx.session.current().ok_or(ReporterError::LoginRequired)?;
    let drafts = actions::drafts_for(&ctx.store, user);

    if drafts.is_empty() {
        output::print_message(ctx.text(NO_DRAFTS));
        return Ok(());
    }

    let language = ctx.language;
    output::print_table(&drafts, |d| DraftRow::new(d, language));
    Ok(())
}

pub fn view(ctx: &Context, id: &str) -> Result<()> {
    let user = ctx.session.current().ok_or(ReporterError::LoginRequired)?;
    let draft = actions::drafts_for(&ctx.store, user)
        .into_iter()
        .find(|draft| draft.id == id)
        .ok_or_else(|| ReporterError::DraftNotFound(id.to_string()))?;
    let lang = ctx.language;

    output::print_item(draft, |draft| {
        println!("{} - {}", draft.id, draft.title.get(lang));
        println!();
        println!("{}", draft.description.get(lang));
        println!();
        if let Some(issue_id) = &draft.issue_id {
            println!("{:<12}#{issue_id}", labels::ISSUE.get(lang));
        }
        println!("{:<12}{}", labels::CATEGORY.get(lang), draft.category.label(lang));
        println!("{:<12}{}", labels::DEPARTMENT.get(lang), draft.department.label(lang));
        println!("{:<12}{}", labels::LOCATION.get(lang), draft.location.get(lang));
        println!("{:<12}{}", labels::SAVED.get(lang), format_date(draft.created_at));
    });
    Ok(())
}

pub fn discard(ctx: &mut Context, id: &str) -> Result<()> {
    actions::discard_draft(&mut ctx.store, id, ctx.session.current())?;
    ctx.store.save()?;
    output::print_message(ctx.text(DISCARDED));
    Ok(())
}
