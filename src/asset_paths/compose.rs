use super::normalize::collapse_slashes;

/// Directory under the site root that holds every asset.
pub const ASSETS_SEGMENT: &str = "assets";

/// Join base URL, assets root, content path and filename into a site-relative URL.
///
/// The parts are concatenated with `/` and then every duplicate slash is collapsed, so empty
/// parts and parts with leading or trailing slashes are harmless.
pub fn compose_asset_url(base_url: &str, path: &str, filename: &str) -> String {
    collapse_slashes(&format!("{base_url}/{ASSETS_SEGMENT}/{path}/{filename}"))
}
