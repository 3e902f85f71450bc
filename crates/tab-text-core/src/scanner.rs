use unicode_segmentation::UnicodeSegmentation;

/// Returns the words of `text` in document order.
///
/// A word is a maximal run under Unicode word segmentation (UAX #29), the
/// closest stand-in for a text widget's word-boundary classifier. The result
/// is rebuilt from scratch on every call; nothing is cached or updated
/// incrementally.
pub fn scan_words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_owned).collect()
}

/// Returns the number of lines in `text`.
///
/// A trailing newline does not open a final empty line, and empty text has
/// zero lines.
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}
