//! `asset-path`: render `asset_path` tags from the command line.

mod cli;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use asset_path_tag::{
    AssetPathTag, ContentIndex, CurrentPage, RenderContext, SiteConfig, TagRegistry,
    VariableInterpolator, load_posts, register_asset_path,
};
use clap::Parser;
use cli::{Cli, Commands, build_scope};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let index = load_index(&cli, &config)?;
    debug!(entries = index.len(), "content index loaded");

    let page = CurrentPage {
        id: cli.page_id.clone(),
        url: cli.page_url.clone(),
    };
    let base_url = cli.baseurl.clone().unwrap_or_else(|| config.baseurl.clone());
    let mut context = RenderContext::new(page, &index, base_url);
    context.scope = build_scope(&cli.vars);

    match &cli.command {
        Commands::Render { markup } => {
            let tag = AssetPathTag::new(markup);
            println!("{}", tag.render_path(&context, &VariableInterpolator));
        }
        Commands::Template { file } => {
            let source = read_document(file)?;
            let mut registry = TagRegistry::new();
            register_asset_path(&mut registry);
            print!(
                "{}",
                registry.render_document(&source, &context, &VariableInterpolator)
            );
        }
        Commands::Index => {
            let json = serde_json::to_string_pretty(index.entries())
                .context("failed to serialise content index")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    match &cli.config {
        Some(path) => SiteConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SiteConfig::discover(&cli.site)),
    }
}

fn load_index(cli: &Cli, config: &SiteConfig) -> Result<ContentIndex> {
    if let Some(path) = cli.index.clone().or_else(|| config.index_path(&cli.site)) {
        return ContentIndex::from_json_path(&path).context("failed to load content index");
    }

    let posts = config.posts_path(&cli.site);
    load_posts(&posts).with_context(|| format!("failed to scan posts in {}", posts.display()))
}

fn read_document(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read template from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read template {}", file.display()))
}
