//! CLI output formatting for all commands.
//!
//! Output is information-centric: the primary display for every post is its
//! semantic identity (positional index, title, date, category) with file
//! paths as secondary context on indented `Source:` lines.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes to stdout.
//!
//! ```text
//! Posts
//! 001 Soul.md Explained (March 11, 2026, The Solution)
//!     Source: soul-md-explained.md
//!     2 FAQ items, 5 headings, 1240 words, 6 min read
//! ```

use crate::generate::{GenerateSummary, PageOutcome};
use crate::inject::{InjectReport, InjectStatus};
use crate::registry::Category;
use crate::render;
use chrono::NaiveDate;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

// ============================================================================
// check
// ============================================================================

/// Per-post inventory line data for the `check` command.
#[derive(Debug, Clone)]
pub struct CheckEntry {
    pub slug: String,
    pub date: NaiveDate,
    pub category: Category,
    pub source: String,
    pub status: CheckStatus,
}

#[derive(Debug, Clone)]
pub enum CheckStatus {
    Parsed {
        title: String,
        faqs: usize,
        headings: usize,
        words: usize,
        minutes: u32,
    },
    MissingSource,
}

pub fn format_check(entries: &[CheckEntry]) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    let mut missing = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        match &entry.status {
            CheckStatus::Parsed {
                title,
                faqs,
                headings,
                words,
                minutes,
            } => {
                lines.push(format!(
                    "{} {} ({}, {})",
                    format_index(i + 1),
                    title,
                    render::format_date(entry.date),
                    entry.category.label()
                ));
                lines.push(format!("    Source: {}", entry.source));
                lines.push(format!(
                    "    {faqs} FAQ items, {headings} headings, {words} words, {minutes} min read"
                ));
            }
            CheckStatus::MissingSource => {
                missing += 1;
                lines.push(format!(
                    "{} {} ({}, {})",
                    format_index(i + 1),
                    entry.slug,
                    render::format_date(entry.date),
                    entry.category.label()
                ));
                lines.push(format!("    Source: {} (missing)", entry.source));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} posts, {} missing source files",
        entries.len(),
        missing
    ));
    lines
}

pub fn print_check(entries: &[CheckEntry]) {
    for line in format_check(entries) {
        println!("{line}");
    }
}

// ============================================================================
// inject
// ============================================================================

pub fn format_inject_report(report: &InjectReport) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &report.outcomes {
        match &outcome.status {
            InjectStatus::Injected {
                faq_count,
                heading_count,
                word_count,
            } => lines.push(format!(
                "{}: {} FAQ items, {} headings, {} words",
                outcome.slug, faq_count, heading_count, word_count
            )),
            InjectStatus::MissingSource(path) => lines.push(format!(
                "SKIP {}: missing source {}",
                outcome.slug,
                path.display()
            )),
            InjectStatus::MissingHtml(path) => lines.push(format!(
                "SKIP {}: missing page {}",
                outcome.slug,
                path.display()
            )),
            InjectStatus::NoHeadTag => {
                lines.push(format!("SKIP {}: page has no </head> tag", outcome.slug));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Done. {} FAQ items across {} posts ({} skipped).",
        report.total_faqs(),
        report.injected_count(),
        report.skipped_count()
    ));
    lines
}

pub fn print_inject_report(report: &InjectReport) {
    for line in format_inject_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_generate_summary(summary: &GenerateSummary, blog_base: &str) -> Vec<String> {
    let base = blog_base.trim_start_matches('/');
    let mut lines = Vec::new();
    for (i, page) in summary.pages.iter().enumerate() {
        let target = format!("{}/{}/index.html", base, page.slug);
        match page.outcome {
            PageOutcome::Rendered => {
                lines.push(format!("{} {} → {}", format_index(i + 1), page.slug, target));
            }
            PageOutcome::MissingSource => {
                lines.push(format!(
                    "{} {} → {} (missing source, wrote not-found page)",
                    format_index(i + 1),
                    page.slug,
                    target
                ));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} post pages and 1 index page",
        summary.rendered_count()
    ));
    lines
}

pub fn print_generate_summary(summary: &GenerateSummary, blog_base: &str) {
    for line in format_generate_summary(summary, blog_base) {
        println!("{line}");
    }
}
