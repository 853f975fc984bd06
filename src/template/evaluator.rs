//! Sub-evaluation of expressions embedded in tag markup.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::models::RenderContext;

/// Host hook that evaluates template expressions nested inside tag markup.
///
/// Tags receive their markup as authored, e.g. `{{ image.file }} {{ post.id }}`. Before
/// parsing it they hand it to the host engine, which returns plain text.
pub trait MarkupEvaluator {
    /// Evaluate every embedded expression in `markup` against the render context.
    fn evaluate(&self, markup: &str, context: &RenderContext<'_>) -> String;
}

/// Evaluator that leaves markup untouched, for hosts that pre-render tag arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl MarkupEvaluator for Verbatim {
    fn evaluate(&self, markup: &str, _context: &RenderContext<'_>) -> String {
        markup.to_string()
    }
}

/// Minimal evaluator replacing `{{ dotted.path }}` with values from the render scope.
///
/// Besides the context scope, `page.id`, `page.url` and `site.baseurl` are always defined.
/// Undefined variables, nulls and composite values render as empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableInterpolator;

fn output_expression() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").expect("invalid output expression regex")
    })
}

impl MarkupEvaluator for VariableInterpolator {
    fn evaluate(&self, markup: &str, context: &RenderContext<'_>) -> String {
        if !markup.contains("{{") {
            return markup.to_string();
        }

        let root = scope_root(context);
        output_expression()
            .replace_all(markup, |captures: &Captures<'_>| {
                lookup(&root, &captures[1]).map(render_value).unwrap_or_default()
            })
            .into_owned()
    }
}

fn scope_root(context: &RenderContext<'_>) -> Value {
    let mut root = Map::new();

    let mut page = Map::new();
    page.insert(
        "id".into(),
        context.page.id.clone().map(Value::String).unwrap_or(Value::Null),
    );
    page.insert("url".into(), Value::String(context.page.url.clone()));
    root.insert("page".into(), Value::Object(page));

    let mut site = Map::new();
    site.insert("baseurl".into(), Value::String(context.base_url.clone()));
    root.insert("site".into(), Value::Object(site));

    // Host variables shadow the built-ins.
    for (name, value) in &context.scope {
        root.insert(name.clone(), value.clone());
    }

    Value::Object(root)
}

fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(root, |current, part| match current {
        Value::Object(map) => map.get(part),
        Value::Array(items) => part.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    })
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::content::ContentIndex;
    use crate::models::CurrentPage;

    #[test]
    fn substitutes_scope_variables() {
        let index = ContentIndex::default();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "")
            .with_variable("image", json!({ "file": "image_one.png", "width": 640 }));

        let evaluated = VariableInterpolator.evaluate("{{ image.file }} {{image.width}}", &context);
        assert_eq!(evaluated, "image_one.png 640");
    }

    #[test]
    fn exposes_page_and_site_builtins() {
        let index = ContentIndex::default();
        let context = RenderContext::new(
            CurrentPage::post("/2013/01/01/post-title", "/2013/01/01/post-title.html"),
            &index,
            "/blog",
        );

        let evaluated =
            VariableInterpolator.evaluate("{{ page.id }}|{{ page.url }}|{{ site.baseurl }}", &context);
        assert_eq!(
            evaluated,
            "/2013/01/01/post-title|/2013/01/01/post-title.html|/blog"
        );
    }

    #[test]
    fn undefined_and_composite_values_render_empty() {
        let index = ContentIndex::default();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "")
            .with_variable("posts", json!([{ "id": "/a" }]));

        assert_eq!(VariableInterpolator.evaluate("[{{ missing.value }}]", &context), "[]");
        assert_eq!(VariableInterpolator.evaluate("[{{ posts }}]", &context), "[]");
        assert_eq!(VariableInterpolator.evaluate("{{ posts.0.id }}", &context), "/a");
        assert_eq!(VariableInterpolator.evaluate("{{ page.id }}", &context), "");
    }

    #[test]
    fn verbatim_returns_markup_unchanged() {
        let index = ContentIndex::default();
        let context = RenderContext::new(CurrentPage::page("/"), &index, "");
        assert_eq!(Verbatim.evaluate("{{ a }} b", &context), "{{ a }} b");
    }
}
