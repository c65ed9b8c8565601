use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use simple_blog::registry::{PublishPolicy, Registry};
use simple_blog::{config, extract, frontmatter, generate, inject, output};
use std::path::{Path, PathBuf};

/// Shared publish-gating flags for commands that select visible posts.
#[derive(clap::Args, Clone)]
struct GatingArgs {
    /// Include posts dated in the future
    #[arg(long)]
    all: bool,

    /// Publish cutoff date (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "all")]
    today: Option<NaiveDate>,
}

impl GatingArgs {
    fn policy(&self) -> PublishPolicy {
        if self.all {
            PublishPolicy::All
        } else {
            let cutoff = self.today.unwrap_or_else(|| Local::now().date_naive());
            PublishPolicy::OnOrBefore(cutoff)
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static blog generator with structured-data SEO")]
#[command(long_about = "\
Static blog generator with structured-data SEO

blog.toml is the data source: it carries the site/author/publisher identity
and the ordered post registry. Markdown posts with front matter live in a
flat directory next to it.

Content structure:

  blog.toml                        # Identity + registry (gen-config for a stock file)
  posts/
  ├── why-your-ai-forgets-everything.md
  ├── soul-md-explained.md         # ---\\ntitle: ...\\ndescription: ...\\n---
  └── openclaw-memory-setup-guide.md

Each post page carries JSON-LD structured data (TechArticle, FAQPage,
BreadcrumbList, WebPage, HowTo, ItemList) and Open Graph meta tags derived
from the post body: the FAQ section, ## headings, step headings, and the
TL;DR blockquote.

Posts dated in the future are held back by default; pass --all or
--today to pick the cutoff explicitly.

Run 'simple-blog gen-config' to generate a documented blog.toml.")]
#[command(version)]
struct Cli {
    /// Blog configuration file (site identity + post registry)
    #[arg(long, default_value = "blog.toml", global = true)]
    config: PathBuf,

    /// Directory containing markdown post sources
    #[arg(long, default_value = "posts", global = true)]
    posts: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full static blog: index, post pages, stylesheet
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,

        #[command(flatten)]
        gating: GatingArgs,
    },
    /// Inject schema and meta blocks into pre-rendered HTML pages
    Inject {
        /// Directory holding {slug}/index.html pages
        #[arg(long, default_value = "dist/blog")]
        html_dir: PathBuf,
    },
    /// Validate the config and inventory all posts without writing output
    Check,
    /// Print a stock blog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { output, gating } => {
            let config = config::load_config(&cli.config)?;
            let registry = Registry::new(config.posts.clone())?;
            let policy = gating.policy();

            println!("==> Building {} → {}", config.site.blog_name, output.display());
            let summary =
                generate::generate(&config, &registry, &policy, &cli.posts, &output)?;
            output::print_generate_summary(&summary, &config.site.blog_base);
            println!("==> Site generated at {}", output.display());
        }
        Command::Inject { html_dir } => {
            let config = config::load_config(&cli.config)?;
            let registry = Registry::new(config.posts.clone())?;

            println!("==> Injecting schema into {}", html_dir.display());
            let report = inject::inject_all(&config, &registry, &cli.posts, &html_dir)?;
            output::print_inject_report(&report);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            let registry = Registry::new(config.posts.clone())?;

            println!("==> Checking {}", cli.config.display());
            let entries = check_entries(&config, &registry, &cli.posts);
            output::print_check(&entries);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Inventory every registry entry for the `check` command: parse each source
/// and collect the counts the extractors would feed into the schema layer.
fn check_entries(
    config: &config::BlogConfig,
    registry: &Registry,
    posts_dir: &Path,
) -> Vec<output::CheckEntry> {
    registry
        .posts()
        .iter()
        .map(|post| {
            let status = match std::fs::read_to_string(posts_dir.join(&post.file)) {
                Ok(raw) => {
                    let doc = frontmatter::parse(&raw);
                    let words = extract::word_count(&doc.body);
                    output::CheckStatus::Parsed {
                        title: doc.title_or(&post.slug),
                        faqs: extract::faq_items(&doc.body).len(),
                        headings: extract::headings(&doc.body).len(),
                        words,
                        minutes: extract::read_time(words, config.reading.words_per_minute),
                    }
                }
                Err(_) => output::CheckStatus::MissingSource,
            };
            output::CheckEntry {
                slug: post.slug.clone(),
                date: post.date,
                category: post.category,
                source: post.file.clone(),
                status,
            }
        })
        .collect()
}
