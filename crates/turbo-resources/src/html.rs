//! HTML tag rendering for resources.

use crate::resource::Attributes;

/// Whether `name` can appear as an HTML attribute name.
///
/// Rejects empty names, whitespace, control characters and the
/// characters `"`, `'`, `>`, `/`, `=`.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '>' | '/' | '=')
        })
}

/// Render attributes as `key="value"` pairs joined by spaces.
///
/// Double quotes inside values are escaped; nothing else is touched so
/// URLs keep their literal `&` separators. Pairs whose key is not a valid
/// attribute name are dropped.
pub fn render_attributes<'a, I>(attributes: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .filter(|(key, _)| is_valid_attribute_name(key))
        .map(|(key, value)| format!(r#"{}="{}""#, key, value.replace('"', "&quot;")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<link rel="stylesheet" ...>` from an attribute map.
pub fn link_tag(attributes: &Attributes) -> String {
    let rendered = render_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if rendered.is_empty() {
        r#"<link rel="stylesheet">"#.to_string()
    } else {
        format!(r#"<link rel="stylesheet" {}>"#, rendered)
    }
}

/// `<link rel="stylesheet" href="...">`.
pub fn stylesheet_href(href: &str) -> String {
    format!(r#"<link rel="stylesheet" {}>"#, render_attributes([("href", href)]))
}

/// `<script ...></script>` from an attribute map.
pub fn script_tag(attributes: &Attributes) -> String {
    let rendered = render_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if rendered.is_empty() {
        "<script></script>".to_string()
    } else {
        format!("<script {}></script>", rendered)
    }
}

/// `<script src="..."></script>`.
pub fn script_src(src: &str) -> String {
    format!("<script {}></script>", render_attributes([("src", src)]))
}

/// Versioned URL for a file inside a served component-suite package.
pub fn component_suite_url(
    suites_prefix: &str,
    namespace: &str,
    path: &str,
    version: &str,
    cache_bust: &str,
) -> String {
    format!(
        "{}{}/{}?v={}&m={}",
        suites_prefix, namespace, path, version, cache_bust
    )
}
