//! # Simple Blog
//!
//! A minimal static blog generator with structured-data SEO. Markdown posts
//! with front matter go in, a rendered blog plus the machine-readable surface
//! search engines consume comes out: JSON-LD structured data (article, FAQ,
//! breadcrumb, how-to, table of contents) and Open Graph meta tags.
//!
//! # Architecture: Pure Core, Two Drivers
//!
//! The parse/extract/synthesize core is pure functions over strings. Two thin
//! effectful drivers consume the same payloads, so the generated site and the
//! injected site can never disagree about a post's metadata:
//!
//! ```text
//! blog.toml + posts/*.md
//!        │
//!        ├─ frontmatter::parse        metadata map + body
//!        ├─ extract::*                FAQ, headings, steps, TL;DR, word count
//!        └─ schema::build_schemas     ordered JSON-LD list
//!           schema::page_meta         title, meta tags, canonical
//!                │
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   generate::generate   inject::inject_all
//!   (render full site)   (rewrite sentinel blocks in existing HTML)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `blog.toml` loading and validation: site/author/publisher identity, reading rate, HowTo policy, colors, cache version |
//! | [`registry`] | The ordered post registry: categories, publish gating, related-post and prev/next selection |
//! | [`frontmatter`] | Front-matter block parsing into metadata map + body |
//! | [`extract`] | FAQ / heading / step / TL;DR extraction, anchors, word count, read time |
//! | [`schema`] | JSON-LD synthesis and the page-metadata payload |
//! | [`render`] | Maud templates for the index, post pages, and the not-found fragment |
//! | [`generate`] | Filesystem driver writing the full static site |
//! | [`inject`] | Filesystem driver rewriting sentinel-delimited blocks in pre-rendered HTML |
//! | [`output`] | CLI output formatting, pure `format_*` plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship or drift.
//!
//! ## Extraction Never Fails
//!
//! Every extractor returns a default (empty map, empty list, `None`) rather
//! than an error. Absent front matter, a missing FAQ section, or a TL;DR-less
//! post are ordinary documents, not failures. Hard errors exist only at the
//! edges: config/registry load (before anything is written) and real IO
//! failures in the drivers.
//!
//! ## Identity Is Configuration
//!
//! Author, publisher, site origin, and the post registry are one immutable
//! [`config::BlogConfig`] value passed into the pure core, never global
//! state. A deployment snapshot is exactly one `blog.toml`.
//!
//! ## Sequential, Independently-Failing Batches
//!
//! Both drivers process posts one at a time. A missing markdown source
//! degrades that one post (not-found page, or an injection skip entry) and
//! the batch continues; one bad post never corrupts another's output.

pub mod config;
pub mod extract;
pub mod frontmatter;
pub mod generate;
pub mod inject;
pub mod output;
pub mod registry;
pub mod render;
pub mod schema;
