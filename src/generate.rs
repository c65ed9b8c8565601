//! Static site generation.
//!
//! The filesystem driver over the pure rendering layer. Reads every visible
//! post's markdown once, then writes the blog tree:
//!
//! ```text
//! dist/
//! └── blog/
//!     ├── index.html                 # Category-grouped post listing
//!     ├── style.css                  # Static styles + config color variables
//!     ├── soul-md-explained/
//!     │   └── index.html             # Full post page with schema in <head>
//!     └── ...
//! ```
//!
//! A post whose markdown source is missing still gets a page, but it is the
//! fixed not-found page, and the index shows the slug-derived placeholder.
//! The build never aborts on a missing source; only real IO failures
//! (unwritable output, unreadable existing file) propagate.

use crate::config::BlogConfig;
use crate::frontmatter::{self, ParsedDocument};
use crate::registry::{PublishPolicy, Registry};
use crate::render::{self, IndexEntry, RelatedEntry};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a post page was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Rendered,
    /// Source markdown was absent; the not-found page was written instead.
    MissingSource,
}

/// One generated page.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub slug: String,
    pub outcome: PageOutcome,
}

/// Build result consumed by the CLI output formatter.
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
    pub pages: Vec<PageResult>,
}

impl GenerateSummary {
    pub fn rendered_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.outcome == PageOutcome::Rendered)
            .count()
    }
}

/// Render the full static blog into `output_dir`.
pub fn generate(
    config: &BlogConfig,
    registry: &Registry,
    policy: &PublishPolicy,
    posts_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let blog_dir = output_dir.join(config.site.blog_base.trim_start_matches('/'));
    fs::create_dir_all(&blog_dir)?;

    fs::write(blog_dir.join("style.css"), render::stylesheet(config))?;

    // One read per visible post; the map feeds the index, the detail pages,
    // and the related-posts rail.
    let visible = registry.published(policy);
    let mut docs: BTreeMap<&str, ParsedDocument> = BTreeMap::new();
    for post in &visible {
        if let Some(doc) = read_post(posts_dir, &post.file)? {
            docs.insert(post.slug.as_str(), doc);
        }
    }

    let entries: Vec<IndexEntry<'_>> = visible
        .iter()
        .map(|post| IndexEntry::new(post, docs.get(post.slug.as_str())))
        .collect();
    let index = render::render_index(config, &entries);
    fs::write(blog_dir.join("index.html"), index.into_string())?;

    let mut summary = GenerateSummary::default();
    for post in &visible {
        let post_dir = blog_dir.join(&post.slug);
        fs::create_dir_all(&post_dir)?;

        let outcome = match docs.get(post.slug.as_str()) {
            Some(doc) => {
                let related: Vec<RelatedEntry<'_>> = registry
                    .related(post, policy)
                    .into_iter()
                    .map(|r| RelatedEntry::new(r, docs.get(r.slug.as_str())))
                    .collect();
                let (prev, next) = registry.neighbors(&post.slug, policy);
                let page = render::render_post_page(config, post, doc, &related, prev, next);
                fs::write(post_dir.join("index.html"), page.into_string())?;
                PageOutcome::Rendered
            }
            None => {
                let page = render::render_not_found_page(config);
                fs::write(post_dir.join("index.html"), page.into_string())?;
                PageOutcome::MissingSource
            }
        };
        summary.pages.push(PageResult {
            slug: post.slug.clone(),
            outcome,
        });
    }

    Ok(summary)
}

/// Read and parse one post source. Absence is a degraded state, not an
/// error; any other IO failure propagates.
fn read_post(posts_dir: &Path, file: &str) -> Result<Option<ParsedDocument>, GenerateError> {
    match fs::read_to_string(posts_dir.join(file)) {
        Ok(raw) => Ok(Some(frontmatter::parse(&raw))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
