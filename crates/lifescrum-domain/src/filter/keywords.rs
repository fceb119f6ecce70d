use std::collections::BTreeMap;

/// Keyword name to accepted values. Keys are case sensitive.
pub type FilterKeywords = BTreeMap<String, Vec<String>>;

/// Parses `weight=3,5 priority=Q1` style input.
///
/// Tokens are split on whitespace. A token needs a non-empty key and a
/// non-empty value around its first `=`; anything after a second `=` is
/// ignored. Values are comma separated and trimmed. When a key repeats, the
/// last occurrence wins.
pub fn parse_filter_keywords(input: &str) -> FilterKeywords {
    let mut keywords = FilterKeywords::new();

    for token in input.split_whitespace() {
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        let values = value.split(',').map(|v| v.trim().to_string()).collect();
        keywords.insert(key.to_string(), values);
    }

    keywords
}
