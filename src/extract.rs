//! Pattern extraction over post bodies.
//!
//! Everything the structured-data synthesizer needs from a markdown body is
//! pulled out here: the FAQ section, plain `##` headings, step headings,
//! the TL;DR abstract, word count, and read time. All extractors are total
//! functions (an absent section is a legitimate empty result, never an
//! error), so the synthesizer and both drivers can call them unconditionally.
//!
//! ## Extraction patterns
//!
//! - **FAQ**: a `## FAQ` or `## Frequently Asked Questions` heading opens the
//!   section, which runs to the next `## ` heading, a `---` thematic break,
//!   or end of document. `### ` sub-headings delimit Q&A blocks.
//! - **Headings**: every `## ` line, for the table-of-contents schema.
//! - **Steps**: `### Step 1: ...` or `### 1. ...` sub-headings, for the
//!   HowTo schema.
//! - **TL;DR**: a blockquote line opening with a bolded `TL;DR` marker,
//!   captured up to the next blank line.

use regex::Regex;
use std::sync::LazyLock;

static FAQ_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (?:FAQ|Frequently Asked Questions)[ \t]*$").unwrap());

static SECTION_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(?:## |---)").unwrap());

static SUB_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### ").unwrap());

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());

static STEP_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^### (?:Step[ \t]+\d+[ \t]*[:.)-]?[ \t]*|\d+[.)][ \t]+)(.+)$").unwrap()
});

static TLDR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>[ \t]*\*\*TL;DR[: \t]*\*\*:?[ \t]*").unwrap());

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// One extracted question/answer pair. The question always ends with a
/// single `?`; the answer has inline markup stripped. Both are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Extract FAQ items from a markdown body.
///
/// Returns items in document order; an absent FAQ section yields an empty
/// vector. Blocks whose question or answer is empty after normalization are
/// dropped, as is any preamble text before the first sub-heading.
pub fn faq_items(body: &str) -> Vec<FaqItem> {
    let Some(section) = faq_section(body) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    // The first split chunk precedes the first sub-heading marker.
    for block in SUB_HEADING_RE.split(section).skip(1) {
        let block = block.trim();
        let mut lines = block.lines();
        let Some(question) = lines.next().and_then(normalize_question) else {
            continue;
        };
        let answer = strip_inline(
            &lines
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        );
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }
        items.push(FaqItem {
            question,
            answer: answer.to_string(),
        });
    }
    items
}

/// The content between the FAQ heading and the next section boundary.
fn faq_section(body: &str) -> Option<&str> {
    let m = FAQ_HEADING_RE.find(body)?;
    let section = body[m.end()..].trim_start_matches('\n');
    match SECTION_END_RE.find(section) {
        Some(end) => Some(&section[..end.start()]),
        None => Some(section),
    }
}

/// Normalize a question line: trailing whitespace and `?` runs collapse to a
/// single terminal `?`. Returns `None` if nothing remains.
fn normalize_question(line: &str) -> Option<String> {
    let base = line
        .trim()
        .trim_end_matches(|c: char| c == '?' || c.is_whitespace());
    if base.is_empty() {
        return None;
    }
    Some(format!("{base}?"))
}

/// All `## ` headings in document order, markup characters stripped.
pub fn headings(body: &str) -> Vec<String> {
    HEADING_RE
        .captures_iter(body)
        .map(|c| clean_heading(&c[1]))
        .filter(|h| !h.is_empty())
        .collect()
}

/// Step sub-headings (`### Step 1: ...` / `### 1. ...`) in document order.
pub fn step_headings(body: &str) -> Vec<String> {
    STEP_HEADING_RE
        .captures_iter(body)
        .map(|c| clean_heading(&c[1]))
        .filter(|h| !h.is_empty())
        .collect()
}

fn clean_heading(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '`' | '[' | ']'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Derive an anchor identifier from a heading: lowercase, runs of
/// non-alphanumeric characters become a single hyphen, no leading or
/// trailing hyphen.
pub fn anchor(heading: &str) -> String {
    let lower = heading.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut prev_dash = false;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// Extract the TL;DR abstract: a blockquote line opening with a bolded
/// `TL;DR` marker, captured up to the next blank line (or end of document),
/// with blockquote markers and inline markup stripped.
pub fn tldr(body: &str) -> Option<String> {
    let m = TLDR_RE.find(body)?;
    let rest = &body[m.end()..];
    let captured = match rest.find("\n\n") {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    let text = captured
        .lines()
        .map(|l| l.trim_start().trim_start_matches('>').trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = strip_inline(&text);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Count words as whitespace-separated runs.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Estimated read time in minutes: words over rate, rounded up, minimum 1.
pub fn read_time(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm).max(1) as u32
}

/// Strip inline markdown: `[text](url)` links become their text, `**` bold
/// markers and `` ` `` code markers are removed.
pub fn strip_inline(text: &str) -> String {
    let text = LINK_RE.replace_all(text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    text.replace("**", "")
}
