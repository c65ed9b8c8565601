//! Front-matter parsing.
//!
//! A post may open with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Search Is Not Memory
//! description: "Why RAG retrieval isn't the same as remembering."
//! ---
//! body...
//! ```
//!
//! Each line splits on its first colon; keys are trimmed, values are trimmed
//! with one layer of surrounding quotes stripped, so values containing colons
//! (URLs, times) survive intact. Parsing is total: a document without a
//! well-formed block yields empty metadata and the input unchanged as the
//! body, and individual lines without a colon are silently skipped.

use std::collections::BTreeMap;

/// A document split into metadata and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Front-matter key/value pairs, e.g. `title`, `description`.
    pub meta: BTreeMap<String, String>,
    /// Raw markdown after the metadata block.
    pub body: String,
}

impl ParsedDocument {
    /// Front-matter `title`, falling back to the given slug with dashes as
    /// spaces, the same fallback the index uses when a source is missing.
    pub fn title_or(&self, slug: &str) -> String {
        self.meta
            .get("title")
            .cloned()
            .unwrap_or_else(|| slug.replace('-', " "))
    }

    /// Front-matter `description`, or empty.
    pub fn description(&self) -> &str {
        self.meta.get("description").map(String::as_str).unwrap_or("")
    }
}

/// Split a raw document into front matter and body.
///
/// The block must start at the first byte of the document and be closed by a
/// `---` line; otherwise the whole input is the body.
pub fn parse(raw: &str) -> ParsedDocument {
    let Some(rest) = raw.strip_prefix("---\n") else {
        return ParsedDocument {
            meta: BTreeMap::new(),
            body: raw.to_string(),
        };
    };

    // The closing marker is a line of exactly "---". A dangling opener with
    // no closer means the document never had front matter.
    let Some((block, body)) = split_at_closing_marker(rest) else {
        return ParsedDocument {
            meta: BTreeMap::new(),
            body: raw.to_string(),
        };
    };

    let mut meta = BTreeMap::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        meta.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    ParsedDocument {
        meta,
        body: body.to_string(),
    }
}

/// Find the `\n---\n` closing marker; returns (metadata block, body).
fn split_at_closing_marker(rest: &str) -> Option<(&str, &str)> {
    // An immediately-empty block ("---\n\n---\n") is legal; the marker search
    // starts at offset 0 so that case falls out naturally.
    let idx = rest.find("\n---\n")?;
    Some((&rest[..idx], &rest[idx + 5..]))
}

/// Strip one leading and one trailing quote character (`"` or `'`), each
/// independently if present.
fn unquote(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}
