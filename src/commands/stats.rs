use std::collections::BTreeMap;
use std::str::FromStr;

use colored::Colorize;

use crate::error::Result;
use crate::i18n::{Language, Localized};
use crate::output;
use crate::stats::{self, CommunityStats};
use crate::store::IssueRepository;
use crate::types::{Category, Department, Status};

use super::Context;

const TITLE: Localized = Localized::new("Community statistics", "إحصائيات المجتمع");
const TOTAL: Localized = Localized::new("Total reports", "إجمالي البلاغات");
const RATE: Localized = Localized::new("Resolution rate", "نسبة الحل");
const BY_STATUS: Localized = Localized::new("By status", "حسب الحالة");
const BY_CATEGORY: Localized = Localized::new("By category", "حسب الفئة");
const BY_DEPARTMENT: Localized = Localized::new("By department", "حسب القسم");

fn print_breakdown<T: FromStr>(
    heading: &str,
    counts: &BTreeMap<String, usize>,
    label: impl Fn(&T) -> String,
) {
    println!();
    println!("{}", heading.bold());
    for (key, count) in counts {
        let name = key.parse::<T>().map(|value| label(&value)).unwrap_or_else(|_| key.clone());
        println!("  {name:<24}{count}");
    }
}

fn display(stats: &CommunityStats, lang: Language) {
    println!("{}", TITLE.get(lang).bold());
    println!();
    println!("{:<26}{}", TOTAL.get(lang), stats.total);
    println!("{:<26}{:.0}%", RATE.get(lang), stats.resolution_rate * 100.0);

    print_breakdown(BY_STATUS.get(lang), &stats.by_status, |s: &Status| {
        s.label(lang).to_string()
    });
    print_breakdown(BY_CATEGORY.get(lang), &stats.by_category, |c: &Category| {
        c.label(lang).to_string()
    });
    print_breakdown(
        BY_DEPARTMENT.get(lang),
        &stats.by_department,
        |d: &Department| d.label(lang).to_string(),
    );
}

pub fn show(ctx: &Context) -> Result<()> {
    let stats = stats::compute(ctx.store.list());
    let lang = ctx.language;
    output::print_item(&stats, |stats| display(stats, lang));
    Ok(())
}
