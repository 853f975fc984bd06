//! The `asset_path` tag and its argument parser.

mod asset_path;
mod parameters;

pub use asset_path::{AssetPathTag, SYNTAX_ERROR, TAG_NAME, register_asset_path};
pub use parameters::parse_parameters;
