use tabled::Tabled;

use crate::actions;
use crate::cli::CommentArgs;
use crate::error::{ReporterError, Result};
use crate::i18n::{Language, Localized};
use crate::output::{self, format_relative, truncate};
use crate::store::IssueRepository;
use crate::types::Comment;

use super::Context;

const NO_COMMENTS: Localized = Localized::new("No comments yet.", "لا توجد تعليقات بعد.");
const ADDED: Localized = Localized::new("Comment added.", "تمت إضافة التعليق.");

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Comment")]
    body: String,
    #[tabled(rename = "When")]
    created_at: String,
}

impl CommentRow {
    fn new(comment: &Comment, language: Language) -> Self {
        Self {
            author: comment
                .author
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            rating: comment.rating.map(stars).unwrap_or_default(),
            body: comment
                .body
                .as_deref()
                .map(|body| truncate(&body.replace('\n', " "), 60))
                .unwrap_or_default(),
            created_at: format_relative(comment.created_at, language),
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn list(ctx: &Context, issue_id: &str) -> Result<()> {
    if ctx.store.get(issue_id).is_none() {
        return Err(ReporterError::IssueNotFound(issue_id.to_string()));
    }

    let comments = ctx.store.comments_for(issue_id);
    if comments.is_empty() {
        output::print_message(ctx.text(NO_COMMENTS));
        return Ok(());
    }

    let language = ctx.language;
    output::print_table(&comments, |c| CommentRow::new(c, language));
    Ok(())
}

pub fn add(ctx: &mut Context, args: CommentArgs) -> Result<()> {
    actions::comment(
        &mut ctx.store,
        &args.id,
        args.body.as_deref(),
        args.rating,
        ctx.session.current(),
    )?;
    ctx.store.save()?;
    output::print_message(ctx.text(ADDED));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
