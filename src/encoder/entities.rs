//! Character references accepted in text payloads.
//!
//! The upstream markup leaves a few XML/numeric character references in text
//! content. They are replaced before the text is written. The table is applied
//! in order, and `&amp;` comes last so `&amp;lt;` yields `&lt;`, not `<`.

/// Replacement table, applied top to bottom.
pub const ENTITIES: [(&str, &str); 9] = [
    ("&#9;", "\t"),
    ("&#x9;", "\t"),
    ("&#10;", "\n"),
    ("&#xA;", "\n"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", "&"),
];

/// Replace every known character reference in `text`.
///
/// ```
/// use estampa::encoder::entities::unescape;
///
/// assert_eq!(unescape("&lt;tag&gt;"), "<tag>");
/// assert_eq!(unescape("A&amp;B"), "A&B");
/// ```
pub fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}
