#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod content;
pub mod models;
pub mod tag;
pub mod template;

pub use config::SiteConfig;
pub use content::{ContentIndex, load_posts};
pub use models::{ContentEntry, CurrentPage, ParsedParameters, RenderContext};
pub use tag::{AssetPathTag, register_asset_path};
pub use template::{MarkupEvaluator, TagRegistry, VariableInterpolator};
