//! Template rendering and interpolation logic

use serde_json::Value;

/// Interpolates `{{dotted.path}}` placeholders with values from `context`.
///
/// Strings are HTML-escaped. Missing values render as nothing, objects and
/// arrays as escaped JSON. An unterminated `{{` is copied through as is.
pub fn interpolate_template(template: &str, context: &Value) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(begin) = rest.find("{{") {
        result.push_str(&rest[..begin]);
        let after_open = &rest[begin + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[begin..]);
            return result;
        };

        let property_path = after_open[..end].trim();
        if let Some(value) = get_nested_value(context, property_path) {
            result.push_str(&escape_html(&value_to_text(value)));
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        Value::Null => String::new(),
    }
}

/// Get nested value from JSON using dot notation (e.g., "item.payload.url").
pub(crate) fn get_nested_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, part| current.get(part))
}

/// Wraps already rendered HTML in the base layout.
///
/// `{{content}}` receives `content` verbatim, `{{title}}` and `{{lang}}` are
/// taken from `context` and escaped. The layout is scanned once, so
/// placeholders inside substituted values stay literal text. Other
/// placeholders are left untouched.
pub fn wrap_in_base(base_template: &str, content: &str, context: &Value) -> String {
    let title = context
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or("Lectern");

    let lang = context
        .get("lang")
        .and_then(|l| l.as_str())
        .unwrap_or("en");

    let mut result = String::with_capacity(base_template.len() + content.len());
    let mut rest = base_template;

    while let Some(begin) = rest.find("{{") {
        result.push_str(&rest[..begin]);
        let after_open = &rest[begin + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[begin..]);
            return result;
        };

        let tag = &rest[begin..begin + end + 4];
        match after_open[..end].trim() {
            "content" => result.push_str(content),
            "title" => result.push_str(&escape_html(title)),
            "lang" => result.push_str(&escape_html(lang)),
            _ => result.push_str(tag),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
