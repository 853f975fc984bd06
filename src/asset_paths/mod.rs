//! Helpers for turning a content entry and a filename into an asset URL.
//!
//! Lookup, URL composition and slash normalisation live in separate submodules so that each
//! step can be tested on its own before the tag strings them together.

mod compose;
mod lookup;
mod normalize;

pub use compose::{ASSETS_SEGMENT, compose_asset_url};
pub use lookup::{POSTS_SEGMENT, resolve_post_path};
pub use normalize::{collapse_slashes, strip_file_segment};
