//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

/// Render `asset_path` tags against a site's posts and configuration
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root containing `_config.yml` and the posts directory
    #[arg(short, long, default_value = ".")]
    pub site: PathBuf,

    /// Config file to use instead of `<site>/_config.yml`
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Override the configured base URL
    #[arg(long)]
    pub baseurl: Option<String>,

    /// JSON content index to use instead of scanning posts
    #[arg(short, long)]
    pub index: Option<PathBuf>,

    /// Id of the post being rendered; omit for regular pages
    #[arg(long)]
    pub page_id: Option<String>,

    /// URL of the page being rendered
    #[arg(long, default_value = "/")]
    pub page_url: String,

    /// Template variable visible to `{{ ... }}` expressions, as `name=value`
    ///
    /// Dotted names build nested objects: `--var image.file=cover.png`.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    pub vars: Vec<(String, String)>,

    /// Log lookup misses and skipped files
    #[arg(short, long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a single tag from its markup
    Render {
        /// Markup following the tag name, e.g. `"my file.pdf" /2012/05/25/post`
        markup: String,
    },

    /// Render every `asset_path` tag in a document
    Template {
        /// Document to render; `-` reads standard input
        file: PathBuf,
    },

    /// Print the content index as JSON
    Index,
}

fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}

/// Build the template scope from `--var` pairs, nesting dotted names.
pub fn build_scope(vars: &[(String, String)]) -> Map<String, Value> {
    let mut scope = Map::new();
    for (name, value) in vars {
        insert_dotted(&mut scope, name, Value::String(value.clone()));
    }
    scope
}

fn insert_dotted(scope: &mut Map<String, Value>, name: &str, value: Value) {
    match name.split_once('.') {
        None => {
            scope.insert(name.to_string(), value);
        }
        Some((head, rest)) => {
            let child = scope
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                insert_dotted(map, rest, value);
            }
        }
    }
}
