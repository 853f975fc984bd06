//! Named tag registration and document rendering for a host template engine.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::warn;

use super::evaluator::MarkupEvaluator;
use crate::models::RenderContext;

/// A tag instance created from its markup, rendered once per page it appears on.
pub trait Tag: Send + Sync {
    /// Produce the text that replaces the tag in the rendered page.
    fn render(&self, context: &RenderContext<'_>, evaluator: &dyn MarkupEvaluator) -> String;
}

/// Constructor turning the raw markup following a tag name into a tag instance.
pub type TagConstructor = fn(&str) -> Box<dyn Tag>;

/// Explicit registry of the tags a host engine knows about.
///
/// Nothing registers itself: the host creates a registry during setup and installs each
/// tag under the name it is invoked with.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<String, TagConstructor>,
}

fn tag_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\{%-?\s*([A-Za-z_][\w-]*)(.*?)-?%\}").expect("invalid tag block regex")
    })
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a tag under `name`, replacing any tag previously registered with that name.
    pub fn register(&mut self, name: impl Into<String>, constructor: TagConstructor) {
        self.tags.insert(name.into(), constructor);
    }

    /// Returns true when a tag called `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Names of every registered tag, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Build the tag registered as `name` from its markup.
    pub fn parse(&self, name: &str, markup: &str) -> Option<Box<dyn Tag>> {
        self.tags.get(name).map(|constructor| constructor(markup))
    }

    /// Render every registered `{% name markup %}` block in `source`.
    ///
    /// Blocks naming unknown tags are left in place so that a later engine pass can handle
    /// them.
    pub fn render_document(
        &self,
        source: &str,
        context: &RenderContext<'_>,
        evaluator: &dyn MarkupEvaluator,
    ) -> String {
        tag_block()
            .replace_all(source, |captures: &Captures<'_>| {
                let name = &captures[1];
                match self.parse(name, &captures[2]) {
                    Some(tag) => tag.render(context, evaluator),
                    None => {
                        warn!(tag = name, "no tag registered under this name");
                        captures[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
