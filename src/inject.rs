//! Build-time schema injection into pre-rendered HTML.
//!
//! For each registry entry, reads the markdown source, runs the shared
//! parse/extract/synthesize pipeline, and rewrites two managed regions in
//! the post's `index.html`:
//!
//! ```text
//! <!-- POST_SCHEMA_START --> ... <!-- POST_SCHEMA_END -->   JSON-LD script
//! <!-- POST_META_START -->   ... <!-- POST_META_END -->     title/meta/canonical
//! ```
//!
//! Existing managed blocks are removed and fresh ones inserted, so repeated
//! runs are idempotent: the second run reproduces the first run's bytes
//! exactly. Everything outside the sentinel pairs is left untouched.
//!
//! Posts are processed sequentially with independent failure. A missing
//! source file, a missing destination page, or a page without a `</head>`
//! tag produces a per-post skip entry in the report; the batch continues.

use crate::config::BlogConfig;
use crate::extract;
use crate::frontmatter;
use crate::registry::Registry;
use crate::schema::{self, MetaAttr, PageMeta};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub const SCHEMA_START: &str = "<!-- POST_SCHEMA_START -->";
pub const SCHEMA_END: &str = "<!-- POST_SCHEMA_END -->";
pub const META_START: &str = "<!-- POST_META_START -->";
pub const META_END: &str = "<!-- POST_META_END -->";

/// Per-post injection outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum InjectStatus {
    Injected {
        faq_count: usize,
        heading_count: usize,
        word_count: usize,
    },
    MissingSource(PathBuf),
    MissingHtml(PathBuf),
    /// The destination page has no `</head>`, so there is nowhere to put a
    /// managed block.
    NoHeadTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostOutcome {
    pub slug: String,
    pub status: InjectStatus,
}

/// Batch result: one outcome per registry entry, in registry order.
#[derive(Debug, Clone, Default)]
pub struct InjectReport {
    pub outcomes: Vec<PostOutcome>,
}

impl InjectReport {
    pub fn injected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, InjectStatus::Injected { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.injected_count()
    }

    pub fn total_faqs(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| match o.status {
                InjectStatus::Injected { faq_count, .. } => Some(faq_count),
                _ => None,
            })
            .sum()
    }
}

/// Run the injector over every registry entry.
///
/// The registry is walked unfiltered: gating is a render-time policy, and a
/// post whose page does not exist yet simply records a skip.
pub fn inject_all(
    config: &BlogConfig,
    registry: &Registry,
    posts_dir: &Path,
    html_dir: &Path,
) -> Result<InjectReport, InjectError> {
    let mut report = InjectReport::default();

    for post in registry.posts() {
        let source = posts_dir.join(&post.file);
        let html_path = html_dir.join(&post.slug).join("index.html");

        if !source.is_file() {
            report.outcomes.push(PostOutcome {
                slug: post.slug.clone(),
                status: InjectStatus::MissingSource(source),
            });
            continue;
        }
        if !html_path.is_file() {
            report.outcomes.push(PostOutcome {
                slug: post.slug.clone(),
                status: InjectStatus::MissingHtml(html_path),
            });
            continue;
        }

        let md = fs::read_to_string(&source)?;
        let doc = frontmatter::parse(&md);
        let schemas = schema::build_schemas(config, post, &doc);
        let meta = schema::page_meta(config, post, &doc);

        let html = fs::read_to_string(&html_path)?;
        let status = match inject_document(&html, &schemas, &meta) {
            Some(updated) => {
                fs::write(&html_path, updated)?;
                InjectStatus::Injected {
                    faq_count: extract::faq_items(&doc.body).len(),
                    heading_count: extract::headings(&doc.body).len(),
                    word_count: extract::word_count(&doc.body),
                }
            }
            None => InjectStatus::NoHeadTag,
        };
        report.outcomes.push(PostOutcome {
            slug: post.slug.clone(),
            status,
        });
    }

    Ok(report)
}

/// Rewrite one HTML document's managed blocks. Returns `None` when the
/// document has no `</head>` tag.
pub fn inject_document(html: &str, schemas: &[Value], meta: &PageMeta) -> Option<String> {
    let stripped = strip_managed(
        &strip_managed(html, SCHEMA_START, SCHEMA_END),
        META_START,
        META_END,
    );
    if !stripped.contains("</head>") {
        return None;
    }

    let with_schema = stripped.replacen(
        "</head>",
        &format!("{}\n</head>", schema_block(schemas)),
        1,
    );

    // The meta block lands right after the charset tag when there is one,
    // otherwise before </head> like the schema block.
    let meta_tag = meta_block(meta);
    let result = match charset_tag_end(&with_schema) {
        Some(idx) => {
            let mut out = with_schema;
            out.insert_str(idx, &format!("\n{meta_tag}"));
            out
        }
        None => with_schema.replacen("</head>", &format!("{meta_tag}\n</head>"), 1),
    };
    Some(result)
}

/// Byte offset just past the `<meta charset=...>` tag, if present.
fn charset_tag_end(html: &str) -> Option<usize> {
    let start = html.find("<meta charset")?;
    html[start..].find('>').map(|i| start + i + 1)
}

/// Remove every `start`..`end` region, each with one trailing newline.
///
/// Insertion always places a block either at the start of its own line or
/// directly followed by a newline it brought along, so removing the block
/// plus one following newline restores the pre-injection bytes exactly.
fn strip_managed(html: &str, start: &str, end: &str) -> String {
    let mut out = html.to_string();
    while let Some(s) = out.find(start) {
        let Some(e) = out[s..].find(end) else {
            break;
        };
        let mut cut_end = s + e + end.len();
        if out[cut_end..].starts_with('\n') {
            cut_end += 1;
        }
        out.replace_range(s..cut_end, "");
    }
    out
}

fn schema_block(schemas: &[Value]) -> String {
    // A literal "</script>" inside post content must not close the tag.
    let json = serde_json::to_string(schemas)
        .unwrap_or_default()
        .replace('<', "\\u003c");
    format!(
        "{SCHEMA_START}\n    <script type=\"application/ld+json\">\n    {json}\n    </script>\n    {SCHEMA_END}"
    )
}

fn meta_block(meta: &PageMeta) -> String {
    let mut lines = Vec::with_capacity(meta.tags.len() + 4);
    lines.push(META_START.to_string());
    lines.push(format!("    <title>{}</title>", escape_html(&meta.title)));
    for tag in &meta.tags {
        let attr = match tag.attr {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        };
        lines.push(format!(
            r#"    <meta {attr}="{}" content="{}">"#,
            tag.key,
            escape_html(&tag.content)
        ));
    }
    lines.push(format!(
        r#"    <link rel="canonical" href="{}">"#,
        meta.canonical_url
    ));
    lines.push(format!("    {META_END}"));
    lines.join("\n")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
