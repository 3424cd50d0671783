use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` cells, ending in `…` when shortened.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset >= s.len() {
        return None;
    }
    let step = s[offset..].graphemes(true).next().map_or(0, str::len);
    Some(offset + step)
}

/// Byte offset of the grapheme before `offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return None;
    }
    s[..offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Terminal column of a byte offset
pub fn display_col(s: &str, offset: usize) -> usize {
    display_width(&s[..offset.min(s.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_chars_double() {
        assert_eq!(display_width("milk"), 4);
        assert_eq!(display_width("牛奶"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_to_width("buy milk", 8), "buy milk");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("buy milk today", 8), "buy mil\u{2026}");
        assert_eq!(truncate_to_width("buy", 1), "\u{2026}");
        assert_eq!(truncate_to_width("buy", 0), "");
    }

    #[test]
    fn truncate_keeps_within_width_for_wide_text() {
        let out = truncate_to_width("买牛奶和面包", 6);
        assert_eq!(out, "买牛\u{2026}");
        assert!(display_width(&out) <= 6);
    }

    #[test]
    fn grapheme_steps_skip_combining_marks() {
        let s = "cafe\u{0301}!";
        let e_start = 3;
        let after_accent = next_grapheme_boundary(s, e_start).unwrap();
        assert_eq!(&s[after_accent..], "!");
        assert_eq!(prev_grapheme_boundary(s, after_accent), Some(e_start));
        assert_eq!(next_grapheme_boundary(s, s.len()), None);
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn display_col_clamps() {
        assert_eq!(display_col("ab", 1), 1);
        assert_eq!(display_col("ab", 10), 2);
    }
}
