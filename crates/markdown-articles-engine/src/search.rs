use regex::Regex;

/// Byte offsets of every occurrence of `query` inside `text`.
///
/// Built for the flattened output of [`crate::parsing::strip_markdown`]: the
/// offsets index into exactly the string that was searched. The query is
/// always treated literally (escaped before compiling), with optional
/// case-insensitive matching. Occurrences do not overlap; an empty query
/// matches nothing.
pub fn indexes_of(text: &str, query: &str, ignore_case: bool) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let flags = if ignore_case { "(?i)" } else { "" };
    let pattern = Regex::new(&format!("{flags}{}", regex::escape(query)))
        .expect("escaped query must compile");
    pattern.find_iter(text).map(|m| m.start()).collect()
}
