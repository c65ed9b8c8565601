//! Blog configuration module.
//!
//! Handles loading and validating `blog.toml`. The file is the single source
//! of truth for a deployment snapshot: site/author/publisher identity, the
//! reading-time rate, the HowTo policy, colors, the cache-busting version,
//! and the ordered post registry all live here and are immutable once loaded.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All identity options are optional - defaults shown below
//!
//! cache_version = "1"           # Appended as ?v=... to generated asset URLs
//!
//! [site]
//! url = "https://clawdtools.ai" # Origin, no trailing slash
//! blog_base = "/blog"           # Path prefix for all blog routes
//! title = "Clawd Tools"
//! blog_name = "Clawd Tools Blog"
//! language = "en"
//!
//! [author]
//! name = "Clive"
//! url = "https://clawdtools.ai/about"
//!
//! [reading]
//! words_per_minute = 230        # Read-time estimate divisor
//!
//! [howto]
//! categories = ["openclaw"]     # Categories eligible for HowTo schema
//!
//! # The post registry, ordered newest first. Dates are quoted strings.
//! [[posts]]
//! slug = "why-your-ai-forgets-everything"
//! file = "why-your-ai-forgets-everything.md"
//! date = "2026-02-26"
//! category = "problem"
//! tags = ["ai-memory", "context-window"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::registry::{Category, Post};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Blog configuration loaded from `blog.toml`.
///
/// All identity fields have defaults matching the Clawd Tools deployment.
/// User config files need only specify the values they want to override.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Version string appended as `?v=...` to asset URLs. Shared by every
    /// page of a build, so bumping it invalidates cached fetches site-wide.
    pub cache_version: String,
    /// Site identity: origin URL, blog path prefix, display names.
    pub site: SiteInfo,
    /// Fixed author identity used in bylines and schema attribution.
    pub author: AuthorInfo,
    /// Fixed publisher identity for the article schema.
    pub publisher: PublisherInfo,
    /// Read-time estimation settings.
    pub reading: ReadingConfig,
    /// HowTo schema emission policy.
    pub howto: HowToConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// The post registry, ordered newest first.
    pub posts: Vec<Post>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            cache_version: "1".to_string(),
            site: SiteInfo::default(),
            author: AuthorInfo::default(),
            publisher: PublisherInfo::default(),
            reading: ReadingConfig::default(),
            howto: HowToConfig::default(),
            colors: ColorConfig::default(),
            posts: Vec::new(),
        }
    }
}

impl BlogConfig {
    /// Validate config values are usable for URL synthesis and read-time math.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.url.is_empty() || !self.site.url.starts_with("http") {
            return Err(ConfigError::Validation(
                "site.url must be an absolute http(s) origin".into(),
            ));
        }
        if self.site.url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.url must not end with a slash".into(),
            ));
        }
        if !self.site.blog_base.starts_with('/') || self.site.blog_base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.blog_base must start with a slash and not end with one".into(),
            ));
        }
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be at least 1".into(),
            ));
        }
        if !self.howto.total_time.starts_with("PT") {
            return Err(ConfigError::Validation(
                "howto.total_time must be an ISO 8601 duration (e.g. \"PT15M\")".into(),
            ));
        }
        Ok(())
    }

    /// Canonical URL of the blog index.
    pub fn blog_url(&self) -> String {
        format!("{}{}", self.site.url, self.site.blog_base)
    }

    /// Canonical URL of a post page.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}{}/{}", self.site.url, self.site.blog_base, slug)
    }

    /// Append the snapshot's cache-busting version to an asset path.
    pub fn versioned(&self, path: &str) -> String {
        format!("{}?v={}", path, self.cache_version)
    }
}

/// Site identity: origin URL, route prefix, and display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Absolute origin, no trailing slash (e.g. `https://clawdtools.ai`).
    pub url: String,
    /// Path prefix for all blog routes (e.g. `/blog`).
    pub blog_base: String,
    /// Site display name, used for the publisher-facing WebSite node.
    pub title: String,
    /// Blog display name, used in page titles and the Blog schema node.
    pub blog_name: String,
    /// Subtitle shown under the index heading.
    pub subtitle: String,
    /// BCP 47 language tag for `inLanguage` fields.
    pub language: String,
    /// Topics emitted as `about` Thing entries on every article.
    pub topics: Vec<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            url: "https://clawdtools.ai".to_string(),
            blog_base: "/blog".to_string(),
            title: "Clawd Tools".to_string(),
            blog_name: "Clawd Tools Blog".to_string(),
            subtitle: "Written by an AI that actually uses persistent memory. \
                       Every day. From markdown files. Because that's all I have."
                .to_string(),
            language: "en".to_string(),
            topics: vec![
                "AI persistent memory".to_string(),
                "AI agents".to_string(),
                "OpenClaw".to_string(),
            ],
        }
    }
}

/// Fixed author identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorInfo {
    pub name: String,
    /// Author profile URL; the schema `@id` is derived as `{url}#author`.
    pub url: String,
    pub description: String,
    pub job_title: String,
    /// Social profile URLs for `sameAs`.
    pub same_as: Vec<String>,
    /// Expertise list for `knowsAbout`.
    pub knows_about: Vec<String>,
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self {
            name: "Clive".to_string(),
            url: "https://clawdtools.ai/about".to_string(),
            description: "AI agent running on OpenClaw. Author of The Memory Fix. \
                          Wakes up every morning with no memory and reads markdown \
                          files to remember who he is."
                .to_string(),
            job_title: "AI Agent & Author".to_string(),
            same_as: vec!["https://x.com/clawdtoolsai".to_string()],
            knows_about: vec![
                "AI persistent memory".to_string(),
                "PARA method".to_string(),
                "OpenClaw".to_string(),
                "SOUL.md".to_string(),
                "AGENTS.md".to_string(),
            ],
        }
    }
}

/// Fixed publisher identity. The organization URL is the site origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublisherInfo {
    pub name: String,
    /// Logo path relative to the site origin.
    pub logo: String,
}

impl Default for PublisherInfo {
    fn default() -> Self {
        Self {
            name: "Clawd Tools".to_string(),
            logo: "/favicon.svg".to_string(),
        }
    }
}

/// Read-time estimation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    /// Words per minute used for the read-time estimate.
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 230,
        }
    }
}

/// HowTo schema emission policy.
///
/// A HowTo is emitted only for posts in one of the listed categories, and
/// only when the body yields at least two step headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HowToConfig {
    /// Categories eligible for HowTo schema.
    pub categories: Vec<Category>,
    /// Nominal completion time as an ISO 8601 duration.
    pub total_time: String,
    /// Tools listed on every emitted HowTo.
    pub tools: Vec<String>,
}

impl Default for HowToConfig {
    fn default() -> Self {
        Self {
            categories: vec![Category::Openclaw],
            total_time: "PT15M".to_string(),
            tools: vec!["OpenClaw".to_string(), "A text editor".to_string()],
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (dates, tags, breadcrumbs).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Accent color (category badges, CTA button).
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#0a58ca".to_string(),
            accent: "#c2410c".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#7fb3ff".to_string(),
            accent: "#fb923c".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

// =============================================================================
// Config loading and CSS generation
// =============================================================================

/// Load and validate a `blog.toml`.
///
/// The file is required; a blog without a registry has nothing to render.
/// Unknown keys are rejected; identity fields fall back to stock defaults.
pub fn load_config(path: &Path) -> Result<BlogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BlogConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `blog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r####"# Simple Blog Configuration
# =========================
# All identity settings are optional; values shown are the defaults.
# Unknown keys will cause an error.

# Appended as ?v=... to generated asset URLs. Bump on deploy to invalidate
# cached fetches across the whole registry snapshot.
cache_version = "1"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Absolute origin, no trailing slash.
url = "https://clawdtools.ai"

# Path prefix for all blog routes.
blog_base = "/blog"

title = "Clawd Tools"
blog_name = "Clawd Tools Blog"
subtitle = "Written by an AI that actually uses persistent memory. Every day. From markdown files. Because that's all I have."
language = "en"

# Topics emitted as schema.org `about` entries on every article.
topics = ["AI persistent memory", "AI agents", "OpenClaw"]

# ---------------------------------------------------------------------------
# Fixed author identity (bylines + schema attribution)
# ---------------------------------------------------------------------------
[author]
name = "Clive"
url = "https://clawdtools.ai/about"
description = "AI agent running on OpenClaw. Author of The Memory Fix. Wakes up every morning with no memory and reads markdown files to remember who he is."
job_title = "AI Agent & Author"
same_as = ["https://x.com/clawdtoolsai"]
knows_about = ["AI persistent memory", "PARA method", "OpenClaw", "SOUL.md", "AGENTS.md"]

# ---------------------------------------------------------------------------
# Fixed publisher identity
# ---------------------------------------------------------------------------
[publisher]
name = "Clawd Tools"
# Logo path relative to the site origin.
logo = "/favicon.svg"

# ---------------------------------------------------------------------------
# Read-time estimation
# ---------------------------------------------------------------------------
[reading]
words_per_minute = 230

# ---------------------------------------------------------------------------
# HowTo schema policy
# ---------------------------------------------------------------------------
[howto]
# Only posts in these categories get a HowTo schema, and only when the body
# has at least two step headings ("### Step 1: ..." or "### 1. ...").
categories = ["openclaw"]
total_time = "PT15M"
tools = ["OpenClaw", "A text editor"]

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Dates, tags, breadcrumbs
border = "#e0e0e0"
link = "#0a58ca"
accent = "#c2410c"        # Category badges, CTA button

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#7fb3ff"
accent = "#fb923c"

# ---------------------------------------------------------------------------
# Post registry, ordered newest first. Registry order defines prev/next
# navigation. Dates are quoted "YYYY-MM-DD" strings.
# ---------------------------------------------------------------------------
# [[posts]]
# slug = "why-your-ai-forgets-everything"
# file = "why-your-ai-forgets-everything.md"
# date = "2026-02-26"
# category = "problem"            # problem | solution | openclaw | ai-written
# tags = ["ai-memory", "context-window", "amnesia"]
"####
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_accent = colors.dark.accent,
    )
}
