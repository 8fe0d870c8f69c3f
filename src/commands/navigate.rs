use const_format::concatcp;

use crate::cli::IssueListArgs;
use crate::error::Result;
use crate::i18n::Localized;
use crate::output;
use crate::routes::Route;

use super::{auth, issues, stats, Context, BIN};

const WELCOME: Localized = Localized::new(
    "Report local problems and follow how they are handled.",
    "أبلغ عن المشكلات المحلية وتابع كيفية معالجتها.",
);
const NOT_FOUND: Localized = Localized::new("Page not found:", "الصفحة غير موجودة:");
const SIGN_UP_HINT: &str = concatcp!(BIN, " signup --help");
const FORGOT_PASSWORD_HINT: &str = concatcp!(BIN, " forgot-password --help");
const REPORT_HINT: &str = concatcp!(BIN, " report --help");
const SIGN_IN_COMMAND: &str = concatcp!(BIN, " signin --help");

const ABOUT: Localized = Localized::new("About", "حول");
const FAQ: Localized = Localized::new("Frequently asked questions", "الأسئلة الشائعة");
const CONTACT: Localized = Localized::new("Contact us", "اتصل بنا");
const PRIVACY: Localized = Localized::new("Privacy policy", "سياسة الخصوصية");
const TERMS: Localized = Localized::new("Terms of service", "شروط الخدمة");

/// Resolve a path through the route table and the guard, then show the view.
pub fn open(ctx: &Context, path: &str) -> Result<()> {
    let route = Route::parse(path)?;
    tracing::debug!(%route, "opening");

    if !ctx.guard(&route) {
        return Ok(());
    }

    match route {
        Route::Home => output::print_message(ctx.text(WELCOME)),
        Route::SignIn => output::print_message(SIGN_IN_COMMAND),
        Route::SignUp => output::print_message(SIGN_UP_HINT),
        Route::ForgotPassword => output::print_message(FORGOT_PASSWORD_HINT),
        Route::Report => output::print_message(REPORT_HINT),
        Route::Profile => auth::profile(ctx)?,
        Route::Stats => stats::show(ctx)?,
        Route::Issues => issues::list(ctx, IssueListArgs::default())?,
        Route::MyReports => issues::my_reports(ctx)?,
        Route::Issue(id) => issues::view(ctx, &id)?,
        Route::ReportProblem(id) => {
            issues::view(ctx, &id)?;
            output::print_message(&format!(
                "{BIN} issue report-problem {id} \"<description>\""
            ));
        }
        Route::About => output::print_message(ctx.text(ABOUT)),
        Route::Faq => output::print_message(ctx.text(FAQ)),
        Route::Contact => output::print_message(ctx.text(CONTACT)),
        Route::Privacy => output::print_message(ctx.text(PRIVACY)),
        Route::Terms => output::print_message(ctx.text(TERMS)),
        Route::NotFound(path) => {
            output::print_message(&format!("{} {path}", ctx.text(NOT_FOUND)));
        }
    }
    Ok(())
}
