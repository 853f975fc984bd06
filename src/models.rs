//! Data structures shared between the tag, the content index and the host seams.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::ContentIndex;

/// One post or page known to the site, as exposed by the content index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentEntry {
  /// Stable identifier, e.g. `/2012/05/25/another-post-title`.
  pub id: String,
  /// URL-safe short name used to build the entry's asset directory.
  pub slug: String,
  /// Site-relative URL of the rendered entry.
  #[serde(default)]
  pub url: String,
}

impl ContentEntry {
  /// Build an entry from its three identifying strings.
  pub fn new(id: impl Into<String>, slug: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      slug: slug.into(),
      url: url.into(),
    }
  }
}

/// The page or post currently being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentPage {
  /// Post identifier. Regular pages have none.
  #[serde(default)]
  pub id: Option<String>,
  /// Site-relative URL of the page.
  #[serde(default)]
  pub url: String,
}

impl CurrentPage {
  /// A post page with both identifier and URL.
  pub fn post(id: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      id: Some(id.into()),
      url: url.into(),
    }
  }

  /// A regular page that is only addressable through its URL.
  pub fn page(url: impl Into<String>) -> Self {
    Self {
      id: None,
      url: url.into(),
    }
  }

  /// Identifier of the page, treating an empty string like a missing one.
  pub fn post_id(&self) -> Option<&str> {
    self.id.as_deref().filter(|id| !id.is_empty())
  }
}

/// Render-time state the host hands to every tag invocation.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
  /// Page or post being rendered.
  pub page: CurrentPage,
  /// Every post known to the site, in build order.
  pub index: &'a ContentIndex,
  /// Site base URL prepended to every generated path. May be empty.
  pub base_url: String,
  /// Template variables visible to markup sub-evaluation.
  pub scope: Map<String, Value>,
}

impl<'a> RenderContext<'a> {
  /// Create a context with an empty variable scope.
  pub fn new(page: CurrentPage, index: &'a ContentIndex, base_url: impl Into<String>) -> Self {
    Self {
      page,
      index,
      base_url: base_url.into(),
      scope: Map::new(),
    }
  }

  /// Bind a template variable, replacing any previous value of the same name.
  pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
    self.scope.insert(name.into(), value);
    self
  }
}

/// Filename and optional post identifier extracted from tag markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParameters {
  /// Asset file name, taken verbatim.
  pub filename: String,
  /// Post identifier. Empty means "use the current page".
  pub post_id: String,
}

/// Optional frontmatter fields read from post source files.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostFrontmatterRecord {
  /// Explicit slug overriding the one derived from the file name.
  pub slug: Option<String>,
  /// Single category the post is filed under.
  pub category: Option<String>,
  /// Categories as a YAML list or a space separated string.
  pub categories: Option<CategoryList>,
  /// Set to `false` to leave the post out of the site.
  pub published: Option<bool>,
}

/// Categories as authored in frontmatter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryList {
  /// `categories: [news, releases]`
  List(Vec<String>),
  /// `categories: news releases`
  Words(String),
}

impl CategoryList {
  /// Flatten into individual category names.
  pub fn names(&self) -> Vec<String> {
    match self {
      CategoryList::List(values) => values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect(),
      CategoryList::Words(value) => value.split_whitespace().map(str::to_string).collect(),
    }
  }
}
