//! JSON-LD structured-data synthesis.
//!
//! [`build_schemas`] turns a registry post plus its parsed document into the
//! ordered schema.org object list a search engine reads, and [`page_meta`]
//! produces the page-metadata payload (title, meta tags, canonical URL).
//! Both are pure functions returning data; the effects (writing a `<head>`,
//! rewriting sentinel blocks) live in the `generate` and `inject`
//! drivers, which consume the same payloads and therefore cannot drift.
//!
//! ## Emission rules
//!
//! | Schema | Condition |
//! |--------|-----------|
//! | TechArticle | always |
//! | FAQPage | at least one extracted FAQ item |
//! | BreadcrumbList | always |
//! | WebPage | always |
//! | HowTo | category in the HowTo allow-list AND at least two step headings |
//! | ItemList (table of contents) | at least one `##` heading |

use crate::config::BlogConfig;
use crate::extract;
use crate::frontmatter::ParsedDocument;
use crate::registry::Post;
use serde_json::{Value, json};

/// Longest abstract emitted on the article schema, in characters.
const ABSTRACT_MAX_CHARS: usize = 300;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Attribute a meta tag is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    /// `<meta name="..." content="...">`
    Name,
    /// `<meta property="..." content="...">` (Open Graph, article:*)
    Property,
}

/// One meta tag upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaTag {
    pub attr: MetaAttr,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Name,
            key: key.to_string(),
            content: content.into(),
        }
    }

    fn property(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Property,
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// The pure page-metadata payload both drivers consume: the generate driver
/// renders it into a maud `<head>`, the injector rewrites it into the
/// sentinel-delimited meta block.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    /// Document title, already suffixed with the blog name.
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    /// Meta tag upserts in emission order.
    pub tags: Vec<MetaTag>,
}

/// Build the page metadata for a post.
pub fn page_meta(config: &BlogConfig, post: &Post, doc: &ParsedDocument) -> PageMeta {
    let title = doc.title_or(&post.slug);
    let description = doc.description().to_string();
    let canonical_url = config.post_url(&post.slug);
    let date = post.date.to_string();

    let tags = vec![
        MetaTag::name("description", description.clone()),
        MetaTag::property("og:title", title.clone()),
        MetaTag::property("og:description", description.clone()),
        MetaTag::property("og:type", "article"),
        MetaTag::property("og:url", canonical_url.clone()),
        MetaTag::property("article:published_time", date),
        MetaTag::property("article:author", config.author.url.clone()),
        MetaTag::property("article:section", post.category.label()),
        MetaTag::name("author", config.author.name.clone()),
    ];

    PageMeta {
        title: format!("{} · {}", title, config.site.blog_name),
        description,
        canonical_url,
        tags,
    }
}

/// Synthesize the ordered JSON-LD schema list for a post.
pub fn build_schemas(config: &BlogConfig, post: &Post, doc: &ParsedDocument) -> Vec<Value> {
    let canonical = config.post_url(&post.slug);
    let title = doc.title_or(&post.slug);
    let description = doc.description();
    let date = post.date.to_string();

    let faq = extract::faq_items(&doc.body);
    let headings = extract::headings(&doc.body);
    let words = extract::word_count(&doc.body);
    let minutes = extract::read_time(words, config.reading.words_per_minute);
    let abstract_text = truncate_chars(
        &extract::tldr(&doc.body).unwrap_or_else(|| description.to_string()),
        ABSTRACT_MAX_CHARS,
    );

    let mut schemas = vec![json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "TechArticle",
        "headline": title,
        "description": description,
        "abstract": abstract_text,
        "author": author_node(config),
        "publisher": publisher_node(config),
        "datePublished": date,
        "dateModified": date,
        "url": canonical,
        "mainEntityOfPage": { "@type": "WebPage", "@id": canonical },
        "keywords": post.tags.join(", "),
        "articleSection": post.category.label(),
        "wordCount": words,
        "timeRequired": format!("PT{minutes}M"),
        "inLanguage": config.site.language,
        "isAccessibleForFree": true,
        "isPartOf": {
            "@type": "Blog",
            "@id": format!("{}#blog", config.blog_url()),
            "name": config.site.blog_name,
        },
        "about": config.site.topics.iter()
            .map(|t| json!({ "@type": "Thing", "name": t }))
            .collect::<Vec<_>>(),
        "speakable": {
            "@type": "SpeakableSpecification",
            "cssSelector": [".post-description", ".post-body blockquote:first-of-type"],
        },
    })];

    if !faq.is_empty() {
        schemas.push(json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "FAQPage",
            "mainEntity": faq.iter().map(|item| json!({
                "@type": "Question",
                "name": item.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": item.answer,
                    "url": canonical,
                    "dateCreated": date,
                    "author": {
                        "@type": "Person",
                        "name": config.author.name,
                        "url": config.author.url,
                    },
                },
            })).collect::<Vec<_>>(),
        }));
    }

    schemas.push(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": [
            { "@type": "ListItem", "position": 1, "name": "Home", "item": config.site.url },
            { "@type": "ListItem", "position": 2, "name": "Blog", "item": config.blog_url() },
            { "@type": "ListItem", "position": 3, "name": title, "item": canonical },
        ],
    }));

    schemas.push(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebPage",
        "@id": canonical,
        "url": canonical,
        "name": title,
        "description": description,
        "inLanguage": config.site.language,
        "isPartOf": {
            "@type": "WebSite",
            "@id": format!("{}#website", config.site.url),
            "name": config.site.title,
            "url": config.site.url,
        },
        "datePublished": date,
        "dateModified": date,
        "author": { "@id": format!("{}#author", config.author.url) },
    }));

    if config.howto.categories.contains(&post.category) {
        let steps = extract::step_headings(&doc.body);
        if steps.len() >= 2 {
            schemas.push(json!({
                "@context": SCHEMA_CONTEXT,
                "@type": "HowTo",
                "name": title,
                "description": description,
                "totalTime": config.howto.total_time,
                "tool": config.howto.tools.iter()
                    .map(|t| json!({ "@type": "HowToTool", "name": t }))
                    .collect::<Vec<_>>(),
                "step": steps.iter().enumerate().map(|(i, step)| json!({
                    "@type": "HowToStep",
                    "position": i + 1,
                    "name": step,
                    "url": format!("{canonical}#{}", extract::anchor(step)),
                })).collect::<Vec<_>>(),
            }));
        }
    }

    if !headings.is_empty() {
        schemas.push(json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "ItemList",
            "name": format!("Table of Contents: {title}"),
            "numberOfItems": headings.len(),
            "itemListElement": headings.iter().enumerate().map(|(i, h)| json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": h,
                "url": format!("{canonical}#{}", extract::anchor(h)),
            })).collect::<Vec<_>>(),
        }));
    }

    schemas
}

fn author_node(config: &BlogConfig) -> Value {
    json!({
        "@type": "Person",
        "@id": format!("{}#author", config.author.url),
        "name": config.author.name,
        "url": config.author.url,
        "sameAs": config.author.same_as,
        "description": config.author.description,
        "jobTitle": config.author.job_title,
        "knowsAbout": config.author.knows_about,
    })
}

fn publisher_node(config: &BlogConfig) -> Value {
    json!({
        "@type": "Organization",
        "@id": format!("{}#organization", config.site.url),
        "name": config.publisher.name,
        "url": config.site.url,
        "logo": {
            "@type": "ImageObject",
            "url": format!("{}{}", config.site.url, config.publisher.logo),
        },
        "sameAs": config.author.same_as,
    })
}

/// Truncate at a char boundary, never mid-codepoint.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;
    use crate::registry::Category;
    use chrono::NaiveDate;

    fn sample_post(category: Category) -> Post {
        Post {
            slug: "openclaw-memory-setup-guide".to_string(),
            file: "openclaw-memory-setup-guide.md".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            category,
            tags: vec!["openclaw".to_string(), "setup".to_string()],
        }
    }

    fn doc_with_body(body: &str) -> ParsedDocument {
        frontmatter::parse(&format!(
            "---\ntitle: Setup Guide\ndescription: A complete walkthrough.\n---\n{body}"
        ))
    }

    fn types_of(schemas: &[Value]) -> Vec<&str> {
        schemas.iter().map(|s| s["@type"].as_str().unwrap()).collect()
    }

    #[test]
    fn article_breadcrumb_webpage_always_emitted() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = doc_with_body("Plain text body with no sections.\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert_eq!(types_of(&schemas), vec!["TechArticle", "BreadcrumbList", "WebPage"]);
    }

    #[test]
    fn article_fields_are_populated() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Openclaw);
        let doc = doc_with_body("word ".repeat(231).trim());
        let schemas = build_schemas(&config, &post, &doc);
        let article = &schemas[0];

        assert_eq!(article["headline"], "Setup Guide");
        assert_eq!(article["description"], "A complete walkthrough.");
        assert_eq!(
            article["url"],
            "https://clawdtools.ai/blog/openclaw-memory-setup-guide"
        );
        assert_eq!(article["datePublished"], "2026-03-04");
        assert_eq!(article["keywords"], "openclaw, setup");
        assert_eq!(article["articleSection"], "OpenClaw Guides");
        assert_eq!(article["wordCount"], 231);
        assert_eq!(article["timeRequired"], "PT2M");
        assert_eq!(article["author"]["name"], "Clive");
        assert_eq!(
            article["author"]["@id"],
            "https://clawdtools.ai/about#author"
        );
        assert_eq!(article["publisher"]["name"], "Clawd Tools");
    }

    #[test]
    fn abstract_prefers_tldr_over_description() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = doc_with_body("> **TL;DR:** The short version.\n\nLong body.\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert_eq!(schemas[0]["abstract"], "The short version.");

        let doc = doc_with_body("No tldr here.\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert_eq!(schemas[0]["abstract"], "A complete walkthrough.");
    }

    #[test]
    fn abstract_is_truncated_to_300_chars() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let long = "x".repeat(400);
        let doc = doc_with_body(&format!("> **TL;DR:** {long}\n\nBody.\n"));
        let schemas = build_schemas(&config, &post, &doc);
        assert_eq!(schemas[0]["abstract"].as_str().unwrap().chars().count(), 300);
    }

    #[test]
    fn faq_schema_emitted_with_attribution() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Solution);
        let doc = doc_with_body("## FAQ\n### Why?\nBecause.\n### How?\nLike this.\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert!(types_of(&schemas).contains(&"FAQPage"));

        let faq = schemas.iter().find(|s| s["@type"] == "FAQPage").unwrap();
        let entities = faq["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["name"], "Why?");
        assert_eq!(entities[0]["acceptedAnswer"]["text"], "Because.");
        assert_eq!(entities[0]["acceptedAnswer"]["author"]["name"], "Clive");
    }

    #[test]
    fn no_faq_section_no_faq_schema() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Solution);
        let doc = doc_with_body("## Not FAQ\n\ntext\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert!(!types_of(&schemas).contains(&"FAQPage"));
    }

    #[test]
    fn breadcrumb_is_three_levels() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = doc_with_body("text\n");
        let schemas = build_schemas(&config, &post, &doc);
        let crumb = schemas
            .iter()
            .find(|s| s["@type"] == "BreadcrumbList")
            .unwrap();
        let items = crumb["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["name"], "Home");
        assert_eq!(items[1]["item"], "https://clawdtools.ai/blog");
        assert_eq!(items[2]["name"], "Setup Guide");
    }

    #[test]
    fn howto_emitted_for_allow_listed_category_with_steps() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Openclaw);
        let doc = doc_with_body(
            "### Step 1: Install\ntext\n### Step 2: Configure\ntext\n### Step 3: Verify\ntext\n",
        );
        let schemas = build_schemas(&config, &post, &doc);
        let howtos: Vec<_> = schemas.iter().filter(|s| s["@type"] == "HowTo").collect();
        assert_eq!(howtos.len(), 1);

        let steps = howtos[0]["step"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0]["position"], 1);
        assert_eq!(steps[0]["name"], "Install");
        assert_eq!(steps[2]["position"], 3);
        assert_eq!(
            steps[0]["url"],
            "https://clawdtools.ai/blog/openclaw-memory-setup-guide#install"
        );
        assert_eq!(howtos[0]["totalTime"], "PT15M");
        assert!(howtos[0]["tool"].as_array().unwrap().len() >= 1);
    }

    #[test]
    fn single_step_heading_yields_no_howto() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Openclaw);
        let doc = doc_with_body("### Step 1: Only one\ntext\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert!(!types_of(&schemas).contains(&"HowTo"));
    }

    #[test]
    fn non_allow_listed_category_yields_no_howto() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = doc_with_body("### Step 1: A\ntext\n### Step 2: B\ntext\n");
        let schemas = build_schemas(&config, &post, &doc);
        assert!(!types_of(&schemas).contains(&"HowTo"));
    }

    #[test]
    fn toc_emitted_when_headings_exist() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = doc_with_body("## One\ntext\n## Two\ntext\n");
        let schemas = build_schemas(&config, &post, &doc);
        let toc = schemas.iter().find(|s| s["@type"] == "ItemList").unwrap();
        assert_eq!(toc["numberOfItems"], 2);
        let items = toc["itemListElement"].as_array().unwrap();
        assert_eq!(items[1]["name"], "Two");
        assert!(
            items[1]["url"]
                .as_str()
                .unwrap()
                .ends_with("openclaw-memory-setup-guide#two")
        );
    }

    #[test]
    fn schema_order_is_stable() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Openclaw);
        let doc = doc_with_body(
            "## Intro\n\n### Step 1: A\n\n### Step 2: B\n\n## FAQ\n### Q?\nA.\n",
        );
        let schemas = build_schemas(&config, &post, &doc);
        assert_eq!(
            types_of(&schemas),
            vec![
                "TechArticle",
                "FAQPage",
                "BreadcrumbList",
                "WebPage",
                "HowTo",
                "ItemList"
            ]
        );
    }

    #[test]
    fn page_meta_tags_and_title() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Openclaw);
        let doc = doc_with_body("text\n");
        let meta = page_meta(&config, &post, &doc);

        assert_eq!(meta.title, "Setup Guide · Clawd Tools Blog");
        assert_eq!(
            meta.canonical_url,
            "https://clawdtools.ai/blog/openclaw-memory-setup-guide"
        );

        let og_url = meta
            .tags
            .iter()
            .find(|t| t.key == "og:url")
            .unwrap();
        assert_eq!(og_url.attr, MetaAttr::Property);
        assert_eq!(og_url.content, meta.canonical_url);

        let author = meta.tags.iter().find(|t| t.key == "author").unwrap();
        assert_eq!(author.attr, MetaAttr::Name);
        assert_eq!(author.content, "Clive");

        let section = meta
            .tags
            .iter()
            .find(|t| t.key == "article:section")
            .unwrap();
        assert_eq!(section.content, "OpenClaw Guides");
    }

    #[test]
    fn page_meta_falls_back_to_slug_title() {
        let config = BlogConfig::default();
        let post = sample_post(Category::Problem);
        let doc = frontmatter::parse("no front matter body");
        let meta = page_meta(&config, &post, &doc);
        assert!(meta.title.starts_with("openclaw memory setup guide"));
    }
}
