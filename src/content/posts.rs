//! Build a content index from a directory of dated post sources.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use gray_matter::{Matter, engine::YAML};
use regex::Regex;
use tracing::debug;

use super::{ContentIndex, ContentIndexError};
use crate::models::{ContentEntry, PostFrontmatterRecord};

/// Date and title encoded in a post file name such as `2012-05-25-another-post-title.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFileName {
  /// Four digit year.
  pub year: u32,
  /// Month of the year, 1-based.
  pub month: u32,
  /// Day of the month, 1-based.
  pub day: u32,
  /// Title part of the name, used as the default slug.
  pub title: String,
}

fn post_file_name_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})-(.+)\.(?:md|markdown|html)$")
      .expect("invalid post file name regex")
  })
}

/// Split a post file name into its date and title, or `None` for non-post files.
pub fn parse_post_file_name(name: &str) -> Option<PostFileName> {
  let captures = post_file_name_pattern().captures(name)?;
  Some(PostFileName {
    year: captures[1].parse().ok()?,
    month: captures[2].parse().ok()?,
    day: captures[3].parse().ok()?,
    title: captures[4].to_string(),
  })
}

/// Read every post in `posts_dir` into a content index in build order.
///
/// Entries are ordered by file name, which puts them in date order. The id of each post is
/// `/<categories>/YYYY/MM/DD/<slug>` and its URL is the same path with `.html` appended.
/// A missing directory yields an empty index.
pub fn load_posts(posts_dir: &Path) -> Result<ContentIndex, ContentIndexError> {
  let read_dir = match fs::read_dir(posts_dir) {
    Ok(read_dir) => read_dir,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      debug!(dir = %posts_dir.display(), "posts directory not found, using empty index");
      return Ok(ContentIndex::default());
    }
    Err(source) => {
      return Err(ContentIndexError::Io {
        path: posts_dir.to_path_buf(),
        source,
      });
    }
  };

  let mut files: Vec<_> = read_dir
    .flatten()
    .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
    .map(|entry| entry.path())
    .collect();
  files.sort();

  let mut index = ContentIndex::default();
  for path in files {
    let file_name = path
      .file_name()
      .map(|name| name.to_string_lossy().to_string())
      .unwrap_or_default();

    let Some(name) = parse_post_file_name(&file_name) else {
      debug!(file = %path.display(), "skipping file without a dated post name");
      continue;
    };

    let content = fs::read_to_string(&path).map_err(|source| ContentIndexError::Io {
      path: path.clone(),
      source,
    })?;
    let frontmatter = parse_post_frontmatter(&content, &path);

    if frontmatter.published == Some(false) {
      debug!(file = %path.display(), "skipping unpublished post");
      continue;
    }

    index.push(post_entry(&name, &frontmatter));
  }

  Ok(index)
}

fn parse_post_frontmatter(content: &str, path: &Path) -> PostFrontmatterRecord {
  let matter = Matter::<YAML>::new();
  let parsed = match matter.parse(content) {
    Ok(parsed) => parsed,
    Err(err) => {
      debug!(file = %path.display(), error = %err, "ignoring unreadable frontmatter");
      return PostFrontmatterRecord::default();
    }
  };

  parsed
    .data
    .and_then(|yaml: serde_yaml::Value| serde_yaml::from_value::<PostFrontmatterRecord>(yaml).ok())
    .unwrap_or_default()
}

fn post_entry(name: &PostFileName, frontmatter: &PostFrontmatterRecord) -> ContentEntry {
  let slug = frontmatter
    .slug
    .as_deref()
    .map(str::trim)
    .filter(|slug| !slug.is_empty())
    .unwrap_or(name.title.as_str())
    .to_string();

  let mut dir = String::new();
  for category in post_categories(frontmatter) {
    dir.push('/');
    dir.push_str(&category);
  }
  dir.push_str(&format!("/{:04}/{:02}/{:02}", name.year, name.month, name.day));

  let id = format!("{dir}/{slug}");
  let url = format!("{id}.html");
  ContentEntry { id, slug, url }
}

fn post_categories(frontmatter: &PostFrontmatterRecord) -> Vec<String> {
  let mut categories: Vec<String> = Vec::new();
  let single = frontmatter.category.iter().map(|value| value.trim().to_string());
  let listed = frontmatter
    .categories
    .iter()
    .flat_map(|list| list.names());

  for category in single.chain(listed) {
    let category = category.to_lowercase();
    if !category.is_empty() && !categories.contains(&category) {
      categories.push(category);
    }
  }
  categories
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn parses_dated_file_names() {
    assert_eq!(
      parse_post_file_name("2012-05-25-another-post-title.md"),
      Some(PostFileName {
        year: 2012,
        month: 5,
        day: 25,
        title: "another-post-title".into(),
      })
    );
    assert_eq!(parse_post_file_name("2013-1-1-post-title.markdown").map(|n| n.day), Some(1));
    assert!(parse_post_file_name("about.md").is_none());
    assert!(parse_post_file_name("2012-05-25-notes.txt").is_none());
  }

  #[test]
  fn loads_posts_in_date_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("2013-01-01-post-title.md"), "# Post\n").unwrap();
    fs::write(
      dir.path().join("2012-05-25-another-post-title.md"),
      "---\ntitle: Another\n---\nBody\n",
    )
    .unwrap();
    fs::write(dir.path().join("README.txt"), "ignored").unwrap();

    let index = load_posts(dir.path()).unwrap();
    let ids: Vec<_> = index.entries().iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["/2012/05/25/another-post-title", "/2013/01/01/post-title"]);
    assert_eq!(index.entries()[1].url, "/2013/01/01/post-title.html");
    assert_eq!(index.entries()[1].slug, "post-title");
  }

  #[test]
  fn frontmatter_overrides_slug_and_adds_categories() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join("2014-02-03-draft-name.md"),
      "---\nslug: final-name\ncategory: News\ncategories: [releases, news]\n---\nBody\n",
    )
    .unwrap();

    let index = load_posts(dir.path()).unwrap();
    let entry = &index.entries()[0];
    assert_eq!(entry.slug, "final-name");
    assert_eq!(entry.id, "/news/releases/2014/02/03/final-name");
    assert_eq!(entry.url, "/news/releases/2014/02/03/final-name.html");
  }

  #[test]
  fn skips_unpublished_posts() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join("2014-02-03-hidden.md"),
      "---\npublished: false\n---\nBody\n",
    )
    .unwrap();

    assert!(load_posts(dir.path()).unwrap().is_empty());
  }

  #[test]
  fn missing_directory_yields_empty_index() {
    let dir = tempdir().unwrap();
    let index = load_posts(&dir.path().join("_posts")).unwrap();
    assert!(index.is_empty());
  }
}
