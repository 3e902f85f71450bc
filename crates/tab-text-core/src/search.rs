use regex::Regex;
use std::ops::Range;

/// Finds the first case-insensitive occurrence of `query` in `text` and
/// returns its byte range.
///
/// An empty query matches nothing. The query is treated as a literal, not a
/// pattern.
pub fn find_first(text: &str, query: &str) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }

    let pattern = format!("(?i){}", regex::escape(query));
    let regex = Regex::new(&pattern).ok()?;
    regex.find(text).map(|m| m.start()..m.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_range_of_single_occurrence() {
        let text = "the quick brown fox";
        let range = find_first(text, "brown").unwrap();
        assert_eq!(range, 10..15);
        assert_eq!(&text[range], "brown");
    }

    #[test]
    fn test_case_insensitive() {
        let range = find_first("Hello World", "hello").unwrap();
        assert_eq!(range, 0..5);
        let range = find_first("hello world", "WORLD").unwrap();
        assert_eq!(range, 6..11);
    }

    #[test]
    fn test_first_match_only() {
        let range = find_first("aba aba aba", "aba").unwrap();
        assert_eq!(range, 0..3);
    }

    #[test]
    fn test_absent_substring() {
        assert!(find_first("hello world", "xyz").is_none());
    }

    #[test]
    fn test_empty_query_is_no_op() {
        assert!(find_first("hello", "").is_none());
    }

    #[test]
    fn test_query_is_literal_not_pattern() {
        // Regex metacharacters must be escaped
        let text = "price is $4.99 today";
        let range = find_first(text, "$4.99").unwrap();
        assert_eq!(&text[range], "$4.99");
        assert!(find_first("aXb", "a.b").is_none());
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let text = "ÜBER alles";
        let range = find_first(text, "über").unwrap();
        assert_eq!(&text[range], "ÜBER");
    }

    #[test]
    fn test_match_spans_newline_boundary_stays_on_bytes() {
        let text = "one\ntwo\nthree";
        let range = find_first(text, "two").unwrap();
        assert_eq!(range, 4..7);
    }
}
