use std::sync::OnceLock;

use regex::Regex;

fn repeated_slashes() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/{2,}").expect("invalid repeated slash regex"))
}

fn file_extension_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.\w+$").expect("invalid extension regex"))
}

/// Collapse every run of two or more `/` into a single one.
///
/// Nothing else is canonicalised: leading slashes, `.` segments and trailing characters are
/// left as they are.
pub fn collapse_slashes(path: &str) -> String {
    repeated_slashes().replace_all(path, "/").into_owned()
}

/// Replace a path that ends in a file name (`.html`, `.md`, ...) with its parent directory.
///
/// Paths without an extension-like suffix are returned unchanged.
pub fn strip_file_segment(path: &str) -> String {
    if file_extension_suffix().is_match(path) {
        parent_dir(path)
    } else {
        path.to_string()
    }
}

// POSIX dirname: "a.html" -> ".", "/a.html" -> "/", "/x/a.html" -> "/x".
fn parent_dir(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { ".".into() } else { "/".into() };
    }

    match trimmed.rfind('/') {
        None => ".".into(),
        Some(index) => {
            let parent = trimmed[..index].trim_end_matches('/');
            if parent.is_empty() {
                "/".into()
            } else {
                parent.to_string()
            }
        }
    }
}
