use serde_json::json;

use crate::error::Result;
use crate::i18n::{self, Language, Localized};
use crate::output;

use super::Context;

const CURRENT: Localized = Localized::new("Current language:", "اللغة الحالية:");
const SWITCHED: Localized = Localized::new("Language set to", "تم تغيير اللغة إلى");

pub fn run(ctx: &mut Context, language: Option<Language>) -> Result<()> {
    let Some(language) = language else {
        let current = ctx.language;
        output::print_item(
            &json!({ "language": current.code(), "direction": current.direction() }),
            |_| println!("{} {} ({})", ctx.text(CURRENT), current.name(), current.code()),
        );
        return Ok(());
    };

    i18n::save(ctx.session.storage_mut(), language)?;
    ctx.language = language;
    output::print_message(&format!("{} {}", ctx.text(SWITCHED), language.name()));
    Ok(())
}
