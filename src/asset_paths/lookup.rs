use tracing::debug;

use crate::content::ContentIndex;

/// Path segment prefixed to every post slug.
pub const POSTS_SEGMENT: &str = "posts";

/// Resolve a post identifier to its asset directory, relative to the assets root.
///
/// The first entry in build order whose id matches wins. An unknown id resolves to an empty
/// segment so that rendering carries on with the site-wide assets directory.
pub fn resolve_post_path(post_id: &str, index: &ContentIndex) -> String {
    match index.find_by_id(post_id) {
        Some(entry) => format!("{POSTS_SEGMENT}/{}", entry.slug),
        None => {
            debug!(post_id, "no content entry matches asset_path post id");
            String::new()
        }
    }
}
