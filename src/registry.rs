//! The post registry and its selection policies.
//!
//! Posts are declared once in `blog.toml`, newest first, and are immutable
//! after load. Registry order is meaningful: it drives prev/next navigation
//! and the order candidates are considered for the related-posts rail.
//!
//! Publish-date gating is an explicit [`PublishPolicy`] value rather than an
//! implicit "today" lookup, so deployments and tests pick the cutoff date
//! deliberately. Every selection operation that can surface a link to a post
//! (related, neighbors, published) takes the policy, so a gated build never
//! links to a post it did not render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate slug in registry: {0}")]
    DuplicateSlug(String),
    #[error("Post {0} has an empty slug")]
    EmptySlug(usize),
    #[error("Post '{0}' has an empty file reference")]
    EmptyFile(String),
}

/// Post category. The set is fixed; each category has a display label used
/// for index grouping, badges, and the `articleSection` schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Problem,
    Solution,
    Openclaw,
    AiWritten,
}

impl Category {
    /// Display order on the blog index.
    pub const INDEX_ORDER: [Category; 4] = [
        Category::AiWritten,
        Category::Problem,
        Category::Solution,
        Category::Openclaw,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Problem => "The Problem",
            Category::Solution => "The Solution",
            Category::Openclaw => "OpenClaw Guides",
            Category::AiWritten => "From the AI",
        }
    }

    /// Stable identifier, as written in `blog.toml` and `data-category`
    /// attributes.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Problem => "problem",
            Category::Solution => "solution",
            Category::Openclaw => "openclaw",
            Category::AiWritten => "ai-written",
        }
    }
}

/// A registry entry. Identity is the slug; the file is resolved relative to
/// the posts directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    /// URL-safe unique identifier.
    pub slug: String,
    /// Markdown source filename.
    pub file: String,
    /// Publish date.
    pub date: NaiveDate,
    /// Category, one of the fixed set.
    pub category: Category,
    /// Ordered tag list.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Publish-date gating policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPolicy {
    /// Every registry entry is visible, future-dated or not.
    All,
    /// Only posts dated on or before the cutoff are visible.
    OnOrBefore(NaiveDate),
}

impl PublishPolicy {
    pub fn includes(&self, post: &Post) -> bool {
        match self {
            PublishPolicy::All => true,
            PublishPolicy::OnOrBefore(cutoff) => post.date <= *cutoff,
        }
    }
}

/// Maximum number of entries in the related-posts rail.
const RELATED_CAP: usize = 4;

/// The validated, ordered post registry.
#[derive(Debug, Clone)]
pub struct Registry {
    posts: Vec<Post>,
}

impl Registry {
    /// Validate and wrap a post list. Slugs must be unique and non-empty,
    /// and every entry needs a file reference.
    pub fn new(posts: Vec<Post>) -> Result<Self, RegistryError> {
        let mut seen = std::collections::BTreeSet::new();
        for (idx, post) in posts.iter().enumerate() {
            if post.slug.is_empty() {
                return Err(RegistryError::EmptySlug(idx));
            }
            if post.file.is_empty() {
                return Err(RegistryError::EmptyFile(post.slug.clone()));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(RegistryError::DuplicateSlug(post.slug.clone()));
            }
        }
        Ok(Self { posts })
    }

    /// All registry entries in declaration order (newest first).
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by slug.
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Registry entries passing the policy, in declaration order.
    pub fn published(&self, policy: &PublishPolicy) -> Vec<&Post> {
        self.posts.iter().filter(|p| policy.includes(p)).collect()
    }

    /// Related posts: shared category OR shared tag, never the post itself,
    /// capped at four, considered in registry order. Only posts visible
    /// under the policy qualify.
    pub fn related<'a>(&'a self, post: &Post, policy: &PublishPolicy) -> Vec<&'a Post> {
        self.posts
            .iter()
            .filter(|p| policy.includes(p))
            .filter(|p| p.slug != post.slug)
            .filter(|p| {
                p.category == post.category || p.tags.iter().any(|t| post.tags.contains(t))
            })
            .take(RELATED_CAP)
            .collect()
    }

    /// Adjacent posts in the visible registry: `prev` is the next-older
    /// entry, `next` the next-newer. The newest post has no `next`; the
    /// oldest has no `prev`.
    pub fn neighbors<'a>(
        &'a self,
        slug: &str,
        policy: &PublishPolicy,
    ) -> (Option<&'a Post>, Option<&'a Post>) {
        let visible = self.published(policy);
        let Some(idx) = visible.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };
        let prev = visible.get(idx + 1).copied();
        let next = if idx > 0 {
            visible.get(idx - 1).copied()
        } else {
            None
        };
        (prev, next)
    }
}
