use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::i18n::Language;
use crate::types::Status;

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print rows as a table, one line per row, or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    match format() {
        OutputFormat::Json => print_json(items),
        OutputFormat::Compact => {
            for row in items.iter().map(&to_row) {
                let fields: Vec<String> = row.fields().into_iter().map(|f| f.to_string()).collect();
                println!("{}", fields.join("\t"));
            }
        }
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize + ?Sized>(item: &T, display: impl FnOnce(&T)) {
    if matches!(format(), OutputFormat::Json) {
        print_json(item);
    } else {
        display(item);
    }
}

/// Print a success message unless `--quiet` was given
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if matches!(format(), OutputFormat::Json) {
        print_json(&serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Status label in the active language, colored by review state
pub fn status_colored(status: &Status, language: Language) -> String {
    let label = status.label(language);
    match status {
        Status::Pending => label.yellow().to_string(),
        Status::InProgress => label.blue().to_string(),
        Status::Resolved => label.green().to_string(),
        Status::Rejected => label.red().to_string(),
        Status::Unrecognized(_) => label.bright_black().to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    let local: DateTime<Local> = date.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Relative time such as "2 days ago" or "منذ 2 يوم"
pub fn format_relative(date: DateTime<Utc>, language: Language) -> String {
    format_relative_from(date, Utc::now(), language)
}

fn format_relative_from(date: DateTime<Utc>, now: DateTime<Utc>, language: Language) -> String {
    let diff = now.signed_duration_since(date);

    let (amount, en_unit, ar_unit) = if diff.num_seconds() < 60 {
        return match language {
            Language::En => "just now".to_string(),
            Language::Ar => "الآن".to_string(),
        };
    } else if diff.num_minutes() < 60 {
        (diff.num_minutes(), "min", "دقيقة")
    } else if diff.num_hours() < 24 {
        (diff.num_hours(), "hour", "ساعة")
    } else if diff.num_days() < 30 {
        (diff.num_days(), "day", "يوم")
    } else {
        return date.format("%Y-%m-%d").to_string();
    };

    match language {
        Language::En => format!(
            "{amount} {en_unit}{} ago",
            if amount == 1 { "" } else { "s" }
        ),
        Language::Ar => format!("منذ {amount} {ar_unit}"),
    }
}

/// Truncate to `max` characters with an ellipsis. Counts characters, not
/// bytes, so Arabic text is never split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
