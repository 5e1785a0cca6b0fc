//! commentdocs — generate mkdocs sites from documentation comments.
//!
//! Every `/** ... */` block carrying an `@mkdocs Document // Page // Section`
//! directive is placed into a per-document tree and rendered as:
//!
//! - `<output>/<Document>/docs/index.md`
//! - `<output>/<Document>/docs/<page.../>section.md`
//! - `<output>/<Document>/mkdocs.yml`
//!
//! Usage: `commentdocs -o site src/ lib/**/*.ts`

mod config;
mod directive;
mod discover;
mod error;
mod model;
mod parser;
mod render;
mod report;
mod tree;
mod writer;

use anyhow::Result;
use clap::Parser;
use config::Config;
use directive::PathDirective;
use report::Outcome;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "commentdocs",
    version,
    about = "Generate mkdocs sites from path-directive documentation comments"
)]
struct Cli {
    /// Input files, directories (scanned recursively) or glob patterns.
    /// Defaults to the current directory.
    files: Vec<String>,

    /// Output root; one subdirectory is written per document
    #[arg(short = 'o', long, default_value = "docs-out")]
    output: PathBuf,

    /// Tag that carries the `Document // Page // Section` placement
    #[arg(short = 'd', long, default_value = config::DEFAULT_DIRECTIVE)]
    directive: String,

    /// Skip paths matching this regex. Can be given multiple times.
    #[arg(short = 'x', long)]
    exclude: Vec<String>,

    /// File of glob patterns to ignore, one per line
    #[arg(short = 'i', long)]
    ignore_file: Option<PathBuf>,

    /// File extension scanned in directories. Replaces the default list;
    /// can be given multiple times.
    #[arg(short = 'e', long = "ext")]
    extensions: Vec<String>,

    /// Log progress (equivalent to RUST_LOG=info)
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose enables INFO, otherwise RUST_LOG or WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new(
        cli.files,
        cli.output,
        cli.directive,
        cli.extensions,
        &cli.exclude,
        cli.ignore_file.as_deref(),
    )?;

    let outcome = generate(&config).await?;
    for line in report::format_summary(&outcome, &config.directive) {
        println!("{}", line);
    }

    if outcome.all_failed() {
        anyhow::bail!("every document failed to generate");
    }
    Ok(())
}

/// Discover → extract → build → render → write.
async fn generate(config: &Config) -> Result<Outcome> {
    let files = discover::discover(config)?;
    debug!("{} input file(s)", files.len());

    let comments: Vec<_> = parser::extract_all(&files)
        .into_iter()
        .filter(|c| {
            let placed = c
                .tags_named(&config.directive)
                .next()
                .and_then(|tag| PathDirective::parse(&tag.raw))
                .is_some();
            if !placed {
                debug!("{}: no @{} directive, skipping", c.source, config.directive);
            }
            placed
        })
        .collect();
    if comments.is_empty() {
        return Ok(Outcome::NothingToDo);
    }

    let trees = tree::build(comments, &config.directive)?;
    for doc in &trees {
        debug!("{}: {} comment(s)", doc.name, tree::comment_count(&doc.entries));
    }
    let rendered: Vec<_> = trees.iter().map(render::render_document).collect();
    for doc in &rendered {
        for diagnostic in &doc.diagnostics {
            warn!("{}", diagnostic);
        }
    }

    let reports = writer::write_all(rendered, &config.output).await;
    Ok(Outcome::Generated(reports))
}
