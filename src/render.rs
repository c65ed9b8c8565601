//! HTML rendering for the blog surface.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! with `pulldown-cmark` converting post bodies. All renderers are pure
//! functions from data to [`Markup`]; the `generate` driver decides where
//! the strings land on disk.
//!
//! ## Pages
//!
//! - **Index** (`{blog_base}/index.html`): posts grouped by category in a
//!   fixed display order, with date, title, excerpt, and tag chips per card.
//! - **Post** (`{blog_base}/{slug}/index.html`): full article with category
//!   badge, byline, rendered body, author card, CTA, related posts, and
//!   prev/next navigation. The head carries the canonical link, meta tag
//!   set, and the JSON-LD schema block.
//! - **Not found**: a fixed fragment for unknown slugs. Resolving a route to
//!   it never touches the filesystem.

use crate::config::{self, BlogConfig};
use crate::extract;
use crate::frontmatter::ParsedDocument;
use crate::registry::{Category, Post};
use crate::schema::{self, MetaAttr, PageMeta};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::Value;

/// A resolved blog route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Post(String),
}

impl Route {
    /// Resolve a request path against the configured blog base. Paths
    /// outside the base resolve to `None`; a trailing slash is ignored.
    pub fn from_path(path: &str, blog_base: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        if path == blog_base || path == format!("{blog_base}/index.html") {
            return Some(Route::Index);
        }
        path.strip_prefix(blog_base)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|slug| !slug.is_empty() && !slug.contains('/'))
            .map(|slug| Route::Post(slug.to_string()))
    }
}

/// Index card data: registry entry plus the title/excerpt read from the
/// post's front matter. A missing source leaves the slug-derived title and
/// an empty excerpt, mirroring the placeholder a failed fetch leaves.
pub struct IndexEntry<'a> {
    pub post: &'a Post,
    pub title: String,
    pub excerpt: String,
}

impl<'a> IndexEntry<'a> {
    pub fn new(post: &'a Post, doc: Option<&ParsedDocument>) -> Self {
        let (title, excerpt) = match doc {
            Some(doc) => (doc.title_or(&post.slug), doc.description().to_string()),
            None => (post.slug.replace('-', " "), String::new()),
        };
        Self {
            post,
            title,
            excerpt,
        }
    }
}

/// Related-posts rail entry.
pub struct RelatedEntry<'a> {
    pub post: &'a Post,
    pub title: String,
}

impl<'a> RelatedEntry<'a> {
    pub fn new(post: &'a Post, doc: Option<&ParsedDocument>) -> Self {
        let title = match doc {
            Some(doc) => doc.title_or(&post.slug),
            None => post.slug.replace('-', " "),
        };
        Self { post, title }
    }
}

/// Format a date for bylines and cards, e.g. "March 4, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn post_href(config: &BlogConfig, slug: &str) -> String {
    format!("{}/{}", config.site.blog_base, slug)
}

fn markdown_to_html(body: &str) -> String {
    let parser = Parser::new(body);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Document scaffolding
// ============================================================================

/// Renders the base HTML document structure. `head_extra` carries the
/// per-page metadata (meta tags, canonical, schema block).
fn base_document(
    page_title: &str,
    config: &BlogConfig,
    head_extra: Markup,
    content: Markup,
) -> Markup {
    let stylesheet = config.versioned(&format!("{}/style.css", config.site.blog_base));
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                (head_extra)
                link rel="stylesheet" href=(stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the per-post head block: meta tag upserts, canonical link, and
/// the JSON-LD schema script. This is the DOM-facing adapter over the pure
/// [`PageMeta`]/schema payloads.
pub fn render_head_meta(meta: &PageMeta, schemas: &[Value]) -> Markup {
    // A literal "</script>" inside post content must not close the tag.
    let json = serde_json::to_string(schemas)
        .unwrap_or_default()
        .replace('<', "\\u003c");
    html! {
        @for tag in &meta.tags {
            @match tag.attr {
                MetaAttr::Name => {
                    meta name=(tag.key) content=(tag.content);
                }
                MetaAttr::Property => {
                    meta property=(tag.key) content=(tag.content);
                }
            }
        }
        link rel="canonical" href=(meta.canonical_url);
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

/// Renders the site header with a breadcrumb back to the site root.
fn site_header(config: &BlogConfig) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                a href="/" { (config.site.title) }
                " › "
                a href={ (config.site.blog_base) "/" } { "Blog" }
            }
        }
    }
}

fn category_badge(category: Category, small: bool) -> Markup {
    html! {
        span class=(if small { "category-badge small" } else { "category-badge" })
            data-category=(category.slug()) {
            (category.label())
        }
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Renders the blog index: posts grouped by category in display order.
pub fn render_index(config: &BlogConfig, entries: &[IndexEntry<'_>]) -> Markup {
    let content = html! {
        (site_header(config))
        main.blog-index {
            div.blog-header {
                h1 { "Blog" }
                p.blog-subtitle { (config.site.subtitle) }
            }
            @for category in Category::INDEX_ORDER {
                @let group = entries.iter()
                    .filter(|e| e.post.category == category)
                    .collect::<Vec<_>>();
                @if !group.is_empty() {
                    div.blog-category {
                        h2.category-label { (category.label()) }
                        div.post-grid {
                            @for entry in group {
                                a.post-card href=(post_href(config, &entry.post.slug))
                                    data-category=(entry.post.category.slug()) {
                                    span.post-date { (format_date(entry.post.date)) }
                                    h3.post-title { (entry.title) }
                                    p.post-excerpt { (entry.excerpt) }
                                    span.post-tags {
                                        @for tag in &entry.post.tags {
                                            span.tag { (tag) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&config.site.blog_name, config, html! {}, content)
}

/// Renders a full post page, head metadata included.
pub fn render_post_page(
    config: &BlogConfig,
    post: &Post,
    doc: &ParsedDocument,
    related: &[RelatedEntry<'_>],
    prev: Option<&Post>,
    next: Option<&Post>,
) -> Markup {
    let meta = schema::page_meta(config, post, doc);
    let schemas = schema::build_schemas(config, post, doc);
    let head = render_head_meta(&meta, &schemas);

    let title = doc.title_or(&post.slug);
    let description = doc.description();
    let body_html = markdown_to_html(&doc.body);
    let words = extract::word_count(&doc.body);
    let minutes = extract::read_time(words, config.reading.words_per_minute);

    let content = html! {
        (site_header(config))
        main {
            article.blog-post {
                a.back-link href={ (config.site.blog_base) "/" } { "← All posts" }
                header.post-header {
                    (category_badge(post.category, false))
                    h1 { (title) }
                    div.post-meta {
                        span.author { "By " (config.author.name) }
                        span.separator { "·" }
                        time datetime=(post.date.to_string()) { (format_date(post.date)) }
                        span.separator { "·" }
                        span.read-time { (minutes) " min read" }
                    }
                    @if !description.is_empty() {
                        p.post-description { (description) }
                    }
                }
                div.post-body { (PreEscaped(body_html)) }
                footer.post-footer {
                    (author_card(config))
                    (cta_block())
                    @if !related.is_empty() {
                        div.related-posts {
                            h3 { "Related Posts" }
                            div.related-grid {
                                @for entry in related {
                                    a.related-card href=(post_href(config, &entry.post.slug)) {
                                        (category_badge(entry.post.category, true))
                                        span.related-title { (entry.title) }
                                    }
                                }
                            }
                        }
                    }
                    nav.post-nav {
                        @if let Some(prev) = prev {
                            a.nav-prev href=(post_href(config, &prev.slug)) { "← Previous" }
                        } @else {
                            span {}
                        }
                        @if let Some(next) = next {
                            a.nav-next href=(post_href(config, &next.slug)) { "Next →" }
                        } @else {
                            span {}
                        }
                    }
                }
            }
        }
    };

    base_document(&meta.title, config, head, content)
}

fn author_card(config: &BlogConfig) -> Markup {
    html! {
        div.author-card {
            div.author-info {
                strong { (config.author.name) }
                p { (config.author.description) }
                @if let Some(profile) = config.author.same_as.first() {
                    a href=(profile) target="_blank" rel="noopener" { "Follow →" }
                }
            }
        }
    }
}

fn cta_block() -> Markup {
    html! {
        div.post-cta {
            h3 { "Want this memory system ready to go?" }
            p {
                "The Memory Fix gives you the complete template bundle — SOUL.md, "
                "AGENTS.md, PARA memory files, nightly review cron, and the full "
                "guide. Set up in 15 minutes."
            }
            a.cta-button href="/" { "Get The Memory Fix →" }
        }
    }
}

/// The fixed not-found fragment for unknown slugs.
pub fn render_not_found_fragment(config: &BlogConfig) -> Markup {
    html! {
        div.post-404 {
            h1 { "Post not found" }
            p {
                a href={ (config.site.blog_base) "/" } { "← Back to blog" }
            }
        }
    }
}

/// A full document wrapping the not-found fragment.
pub fn render_not_found_page(config: &BlogConfig) -> Markup {
    let title = format!("Post not found · {}", config.site.blog_name);
    base_document(&title, config, html! {}, html! {
        (site_header(config))
        main { (render_not_found_fragment(config)) }
    })
}

/// The color-variable CSS for a config, prepended to the static stylesheet.
pub fn stylesheet(blog_config: &BlogConfig) -> String {
    const CSS_STATIC: &str = include_str!("../static/style.css");
    format!(
        "{}\n\n{}",
        config::generate_color_css(&blog_config.colors),
        CSS_STATIC
    )
}
