//! End-to-end pipeline tests: load a blog.toml from disk, build the full
//! site, then run the injector over pre-rendered pages and check the managed
//! blocks are stable across repeated runs.

use simple_blog::registry::{PublishPolicy, Registry};
use simple_blog::{config, generate, inject};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BLOG_TOML: &str = r#"
cache_version = "3"

[site]
url = "https://clawdtools.ai"

[[posts]]
slug = "openclaw-memory-setup-guide"
file = "openclaw-memory-setup-guide.md"
date = "2026-03-04"
category = "openclaw"
tags = ["openclaw", "setup", "tutorial"]

[[posts]]
slug = "why-your-ai-forgets-everything"
file = "why-your-ai-forgets-everything.md"
date = "2026-02-26"
category = "problem"
tags = ["ai-memory", "context-window", "amnesia"]
"#;

const GUIDE_MD: &str = r#"---
title: OpenClaw Memory Setup Guide
description: Give your agent a memory that survives the night.
---
> **TL;DR:** Three files and a cron job give your agent persistent memory.

## Why Bother

Context windows close. Files stay.

### Step 1: Install OpenClaw

Run the installer.

### Step 2: Create SOUL.md

Write down who your agent is.

### Step 3: Schedule the nightly review

One cron line.

## FAQ

### Does this survive restarts?

Yes, everything lives in **markdown files** on disk.

### How long does setup take

About [fifteen minutes](https://clawdtools.ai) end to end.
"#;

const FORGETS_MD: &str = r#"---
title: Why Your AI Forgets Everything
description: The context window is not a memory.
---
## The Amnesia Loop

Every session starts from zero.
"#;

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("blog.toml"), BLOG_TOML).unwrap();
    let posts = dir.join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(posts.join("openclaw-memory-setup-guide.md"), GUIDE_MD).unwrap();
    fs::write(posts.join("why-your-ai-forgets-everything.md"), FORGETS_MD).unwrap();
}

#[test]
fn build_renders_full_site_from_config_on_disk() {
    let tmp = TempDir::new().unwrap();
    write_fixtures(tmp.path());

    let config = config::load_config(&tmp.path().join("blog.toml")).unwrap();
    let registry = Registry::new(config.posts.clone()).unwrap();
    let out = tmp.path().join("dist");

    let summary = generate::generate(
        &config,
        &registry,
        &PublishPolicy::All,
        &tmp.path().join("posts"),
        &out,
    )
    .unwrap();
    assert_eq!(summary.rendered_count(), 2);

    let index = fs::read_to_string(out.join("blog/index.html")).unwrap();
    assert!(index.contains("OpenClaw Memory Setup Guide"));
    assert!(index.contains("Why Your AI Forgets Everything"));
    // Grouped under their category labels.
    assert!(index.contains("OpenClaw Guides"));
    assert!(index.contains("The Problem"));
    // Cache-busted stylesheet reference from the snapshot's version.
    assert!(index.contains("style.css?v=3"));

    let guide = fs::read_to_string(out.join("blog/openclaw-memory-setup-guide/index.html")).unwrap();
    // The schema block carries the full set for this post.
    assert!(guide.contains("TechArticle"));
    assert!(guide.contains("FAQPage"));
    assert!(guide.contains("BreadcrumbList"));
    assert!(guide.contains("HowTo"));
    assert!(guide.contains("ItemList"));
    assert!(guide.contains("Three files and a cron job"));
    assert!(
        guide.contains(r#"rel="canonical" href="https://clawdtools.ai/blog/openclaw-memory-setup-guide""#)
    );
}

#[test]
fn publish_gating_is_driven_by_the_cutoff_date() {
    let tmp = TempDir::new().unwrap();
    write_fixtures(tmp.path());

    let config = config::load_config(&tmp.path().join("blog.toml")).unwrap();
    let registry = Registry::new(config.posts.clone()).unwrap();
    let out = tmp.path().join("dist");

    // Cutoff between the two posts: only the older one is built.
    let cutoff = "2026-03-01".parse().unwrap();
    let summary = generate::generate(
        &config,
        &registry,
        &PublishPolicy::OnOrBefore(cutoff),
        &tmp.path().join("posts"),
        &out,
    )
    .unwrap();

    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.pages[0].slug, "why-your-ai-forgets-everything");
    assert!(!out.join("blog/openclaw-memory-setup-guide").exists());
}

#[test]
fn inject_into_prerendered_pages_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_fixtures(tmp.path());

    let config = config::load_config(&tmp.path().join("blog.toml")).unwrap();
    let registry = Registry::new(config.posts.clone()).unwrap();

    // Pre-rendered pages as a deploy pipeline would leave them.
    let site = tmp.path().join("site");
    for slug in [
        "openclaw-memory-setup-guide",
        "why-your-ai-forgets-everything",
    ] {
        fs::create_dir_all(site.join(slug)).unwrap();
        fs::write(
            site.join(slug).join("index.html"),
            "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <title>placeholder</title>\n</head>\n<body>\n<div id=\"blog-content\"></div>\n\
             </body>\n</html>\n",
        )
        .unwrap();
    }

    let posts = tmp.path().join("posts");
    let report = inject::inject_all(&config, &registry, &posts, &site).unwrap();
    assert_eq!(report.injected_count(), 2);
    assert_eq!(report.total_faqs(), 2);

    let first = fs::read_to_string(site.join("openclaw-memory-setup-guide/index.html")).unwrap();
    assert!(first.contains("<!-- POST_SCHEMA_START -->"));
    assert!(first.contains("<!-- POST_META_START -->"));
    assert!(first.contains("HowTo"));
    // Untouched bytes survive.
    assert!(first.contains("<div id=\"blog-content\"></div>"));

    // Second run: byte-identical.
    inject::inject_all(&config, &registry, &posts, &site).unwrap();
    let second = fs::read_to_string(site.join("openclaw-memory-setup-guide/index.html")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn inject_skips_missing_posts_without_aborting() {
    let tmp = TempDir::new().unwrap();
    write_fixtures(tmp.path());
    // Remove one source; keep its page directory absent too.
    fs::remove_file(tmp.path().join("posts/why-your-ai-forgets-everything.md")).unwrap();

    let config = config::load_config(&tmp.path().join("blog.toml")).unwrap();
    let registry = Registry::new(config.posts.clone()).unwrap();

    let site = tmp.path().join("site");
    fs::create_dir_all(site.join("openclaw-memory-setup-guide")).unwrap();
    fs::write(
        site.join("openclaw-memory-setup-guide/index.html"),
        "<html>\n<head>\n<meta charset=\"UTF-8\">\n</head>\n<body></body>\n</html>\n",
    )
    .unwrap();

    let report =
        inject::inject_all(&config, &registry, &tmp.path().join("posts"), &site).unwrap();
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.injected_count(), 1);
    assert_eq!(report.skipped_count(), 1);
}
