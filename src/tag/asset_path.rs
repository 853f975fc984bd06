use tracing::warn;

use super::parameters::parse_parameters;
use crate::asset_paths::{compose_asset_url, resolve_post_path, strip_file_segment};
use crate::models::{ParsedParameters, RenderContext};
use crate::template::{MarkupEvaluator, Tag, TagRegistry};

/// Name the tag is invoked with: `{% asset_path filename post_id %}`.
pub const TAG_NAME: &str = "asset_path";

/// Text rendered in place of the tag when it is used without arguments.
pub const SYNTAX_ERROR: &str =
    "Error processing input, expected syntax: {% asset_path filename post_id %}";

/// The `asset_path` tag: resolves a filename to the asset URL of a post or page.
///
/// `{% asset_path kitten.png %}` on post `2013-01-01-post-title` renders
/// `/assets/posts/post-title/kitten.png`, and on page `/page-title/` renders
/// `/assets/page-title/kitten.png`. A post id after the filename selects another post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPathTag {
    markup: String,
}

impl AssetPathTag {
    /// Create the tag from the raw markup following its name.
    pub fn new(markup: &str) -> Self {
        Self {
            markup: markup.trim().to_string(),
        }
    }

    /// Markup as stored, with surrounding whitespace removed.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Evaluate the markup through the host and split it into filename and post id.
    pub fn parameters(
        &self,
        context: &RenderContext<'_>,
        evaluator: &dyn MarkupEvaluator,
    ) -> ParsedParameters {
        let evaluated = evaluator.evaluate(&self.markup, context);
        let parameters = parse_parameters(&evaluated);
        if parameters.filename.is_empty() {
            warn!(markup = %self.markup, "asset_path arguments evaluated to an empty filename");
        }
        parameters
    }

    /// Render the asset URL for the current page, or [`SYNTAX_ERROR`] for empty markup.
    pub fn render_path(
        &self,
        context: &RenderContext<'_>,
        evaluator: &dyn MarkupEvaluator,
    ) -> String {
        if self.markup.is_empty() {
            return SYNTAX_ERROR.to_string();
        }

        let ParsedParameters { filename, post_id } = self.parameters(context, evaluator);

        let post_id = if post_id.is_empty() {
            context.page.post_id().unwrap_or_default().to_string()
        } else {
            post_id
        };

        let path = if post_id.is_empty() {
            context.page.url.clone()
        } else {
            resolve_post_path(&post_id, context.index)
        };

        compose_asset_url(&context.base_url, &strip_file_segment(&path), &filename)
    }
}

impl Tag for AssetPathTag {
    fn render(&self, context: &RenderContext<'_>, evaluator: &dyn MarkupEvaluator) -> String {
        self.render_path(context, evaluator)
    }
}

fn construct(markup: &str) -> Box<dyn Tag> {
    Box::new(AssetPathTag::new(markup))
}

/// Install the `asset_path` tag into a host registry.
pub fn register_asset_path(registry: &mut TagRegistry) {
    registry.register(TAG_NAME, construct);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::content::ContentIndex;
    use crate::models::{ContentEntry, CurrentPage};
    use crate::template::{VariableInterpolator, Verbatim};

    fn index() -> ContentIndex {
        ContentIndex::new(vec![
            ContentEntry::new(
                "/2013/01/01/post-title",
                "post-title",
                "/2013/01/01/post-title.html",
            ),
            ContentEntry::new(
                "/2012/05/25/another-post-title",
                "another-post-title",
                "/2012/05/25/another-post-title.html",
            ),
        ])
    }

    fn render(markup: &str, context: &RenderContext<'_>) -> String {
        AssetPathTag::new(markup).render_path(context, &VariableInterpolator)
    }

    #[test]
    fn explicit_post_id_resolves_to_post_assets() {
        let index = index();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "");
        assert_eq!(
            render("document.pdf /2012/05/25/another-post-title", &context),
            "/assets/posts/another-post-title/document.pdf"
        );
    }

    #[test]
    fn regular_pages_use_their_url() {
        let index = index();
        let context = RenderContext::new(CurrentPage::page("/page-title/"), &index, "");
        assert_eq!(render("pirate.mov", &context), "/assets/page-title/pirate.mov");
    }

    #[test]
    fn quoted_filenames_keep_spaces() {
        let index = index();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "");
        assert_eq!(
            render(
                r#""document with spaces in name.pdf" /2012/05/25/another-post-title"#,
                &context
            ),
            "/assets/posts/another-post-title/document with spaces in name.pdf"
        );
    }

    #[test]
    fn current_post_and_base_url_are_applied() {
        let index = index();
        let context = RenderContext::new(
            CurrentPage::post("/2013/01/01/post-title", "/2013/01/01/post-title.html"),
            &index,
            "/blog",
        );
        assert_eq!(render("kitten.png", &context), "/blog/assets/posts/post-title/kitten.png");
    }

    #[test]
    fn empty_markup_renders_syntax_error() {
        let index = index();
        let plain = RenderContext::new(CurrentPage::page("/"), &index, "");
        let post = RenderContext::new(CurrentPage::post("/2013/01/01/post-title", ""), &index, "/blog");

        assert_eq!(render("", &plain), SYNTAX_ERROR);
        assert_eq!(render("   \t\n", &post), SYNTAX_ERROR);
    }

    #[test]
    fn unknown_post_ids_fall_back_to_assets_root() {
        let index = index();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "");
        assert_eq!(render("a.png /1999/01/01/missing", &context), "/assets/a.png");
    }

    #[test]
    fn page_urls_with_file_names_use_their_directory() {
        let index = index();
        let context = RenderContext::new(CurrentPage::page("/docs/install.html"), &index, "");
        assert_eq!(render("diagram.svg", &context), "/assets/docs/diagram.svg");
    }

    #[test]
    fn loop_variables_are_evaluated_before_parsing() {
        let index = index();
        let on_post = RenderContext::new(
            CurrentPage::post("/2013/01/01/post-title", "/2013/01/01/post-title.html"),
            &index,
            "",
        );
        for file in ["image_one.png", "image_two.png"] {
            let context = on_post.clone().with_variable("image", json!({ "file": file }));
            assert_eq!(
                render("{{ image.file }}", &context),
                format!("/assets/posts/post-title/{file}")
            );
        }

        let on_index = RenderContext::new(CurrentPage::page("/index.html"), &index, "");
        let covers: Vec<_> = index
            .entries()
            .iter()
            .map(|entry| {
                let context = on_index.clone().with_variable("post", json!({ "id": entry.id }));
                render("cover.jpg {{post.id}}", &context)
            })
            .collect();
        assert_eq!(covers, vec![
            "/assets/posts/post-title/cover.jpg",
            "/assets/posts/another-post-title/cover.jpg",
        ]);
    }

    #[test]
    fn outputs_never_contain_double_slashes() {
        let index = index();
        let pages = [
            CurrentPage::page("//weird//url//"),
            CurrentPage::page(""),
            CurrentPage::post("/2012/05/25/another-post-title", ""),
        ];
        let markups = ["a.png", "'x y.png' /2013/01/01/post-title", "b.png //nope//", "c.png"];

        for page in pages {
            let context = RenderContext::new(page, &index, "//base//");
            for markup in markups {
                let output = render(markup, &context);
                assert!(!output.contains("//"), "{markup} rendered {output}");
            }
        }
    }

    #[test]
    fn registers_under_asset_path() {
        let mut registry = TagRegistry::new();
        register_asset_path(&mut registry);

        let index = index();
        let context = RenderContext::new(
            CurrentPage::post("/2013/01/01/post-title", "/2013/01/01/post-title.html"),
            &index,
            "",
        );
        let rendered = registry.render_document(
            r#"<img src="{% asset_path kitten.png %}"> {% asset_path %}"#,
            &context,
            &Verbatim,
        );
        assert_eq!(
            rendered,
            format!(r#"<img src="/assets/posts/post-title/kitten.png"> {SYNTAX_ERROR}"#)
        );
    }
}
