//! Grapheme and display-width helpers for line editing.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Iterate the grapheme clusters of `text`.
pub fn grapheme_segments(text: &str) -> impl DoubleEndedIterator<Item = &str> {
    text.graphemes(true)
}

/// Display width of `text` in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// The grapheme cluster ending at byte offset `offset`, if any.
///
/// `offset` must lie on a char boundary.
pub fn grapheme_before(text: &str, offset: usize) -> Option<&str> {
    grapheme_segments(&text[..offset]).next_back()
}

/// The grapheme cluster starting at byte offset `offset`, if any.
///
/// `offset` must lie on a char boundary.
pub fn grapheme_after(text: &str, offset: usize) -> Option<&str> {
    grapheme_segments(&text[offset..]).next()
}

#[cfg(test)]
mod tests {
    use super::{display_width, grapheme_after, grapheme_before};

    #[test]
    fn width_counts_cells_not_bytes() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("héllo"), 5);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn grapheme_neighbors_respect_cluster_boundaries() {
        let text = "ab日c";
        assert_eq!(grapheme_before(text, 2), Some("b"));
        assert_eq!(grapheme_after(text, 2), Some("日"));
        assert_eq!(grapheme_before(text, 0), None);
        assert_eq!(grapheme_after(text, text.len()), None);
    }

    #[test]
    fn combining_marks_stay_attached() {
        let text = "e\u{301}x";
        assert_eq!(grapheme_after(text, 0), Some("e\u{301}"));
        assert_eq!(grapheme_before(text, text.len()), Some("x"));
    }
}
