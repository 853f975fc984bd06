use crate::models::ParsedParameters;

/// Split evaluated tag arguments into a filename and an optional post id.
///
/// A filename starting with `'` or `"` runs to the last occurrence of the same quote, which
/// lets it contain whitespace. Whatever follows the closing quote is the post id. Unquoted
/// input is split on whitespace and only the first two words are used.
///
/// An opening quote with no closing quote makes the whole remainder the filename.
pub fn parse_parameters(evaluated: &str) -> ParsedParameters {
    let parameters = evaluated.trim();

    if let Some(quote @ ('"' | '\'')) = parameters.chars().next() {
        let body = &parameters[quote.len_utf8()..];
        return match body.rfind(quote) {
            Some(close) => ParsedParameters {
                filename: body[..close].to_string(),
                post_id: body[close + quote.len_utf8()..].trim().to_string(),
            },
            None => ParsedParameters {
                filename: body.to_string(),
                post_id: String::new(),
            },
        };
    }

    let mut words = parameters.split_whitespace();
    ParsedParameters {
        filename: words.next().unwrap_or_default().to_string(),
        post_id: words.next().unwrap_or_default().to_string(),
    }
}
