//! The site's content index: every post the `asset_path` tag can refer to by id.

mod posts;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::ContentEntry;

pub use posts::{PostFileName, load_posts, parse_post_file_name};

/// Errors that can occur while building a content index from disk.
#[derive(Debug, Error)]
pub enum ContentIndexError {
  /// Failed to read a file or directory.
  #[error("failed to read {}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse a JSON content index export.
  #[error("failed to parse content index {}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

/// Ordered, read-only collection of the site's posts.
///
/// Order is the site build order. Lookups return the earliest entry when ids collide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
  entries: Vec<ContentEntry>,
}

impl ContentIndex {
  /// Wrap entries that are already in build order.
  pub fn new(entries: Vec<ContentEntry>) -> Self {
    Self { entries }
  }

  /// Load an index exported as a JSON array of `{ "id", "slug", "url" }` objects.
  pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ContentIndexError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ContentIndexError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let entries: Vec<ContentEntry> =
      serde_json::from_str(&contents).map_err(|source| ContentIndexError::Parse {
        path: path.to_path_buf(),
        source,
      })?;
    Ok(Self::new(entries))
  }

  /// All entries in build order.
  pub fn entries(&self) -> &[ContentEntry] {
    &self.entries
  }

  /// First entry whose id equals `id`.
  pub fn find_by_id(&self, id: &str) -> Option<&ContentEntry> {
    self.entries.iter().find(|entry| entry.id == id)
  }

  /// Append an entry at the end of the build order.
  pub fn push(&mut self, entry: ContentEntry) {
    self.entries.push(entry);
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true when the index holds no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<ContentEntry> for ContentIndex {
  fn from_iter<I: IntoIterator<Item = ContentEntry>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}
