use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into `max_cells` terminal cells, replacing the overflow with `…`.
///
/// Cuts on grapheme boundaries, so a wide character straddling the limit
/// is dropped rather than split.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    match max_cells {
        0 => String::new(),
        1 => "\u{2026}".to_string(),
        _ => {
            let keep = widest_prefix(s, max_cells - 1);
            let mut out = String::with_capacity(keep.len() + 3);
            out.push_str(keep);
            out.push('\u{2026}');
            out
        }
    }
}

/// Longest prefix of `s` no wider than `cells`, cut on a grapheme boundary.
fn widest_prefix(s: &str, cells: usize) -> &str {
    let mut used = 0;
    for (offset, grapheme) in s.grapheme_indices(true) {
        used += UnicodeWidthStr::width(grapheme);
        if used > cells {
            return &s[..offset];
        }
    }
    s
}

/// Byte offset of the grapheme boundary after `offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset >= s.len() {
        return None;
    }
    let next = s
        .grapheme_indices(true)
        .map(|(i, _)| i)
        .find(|&i| i > offset)
        .unwrap_or(s.len());
    Some(next)
}

/// Byte offset of the grapheme boundary before `offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    s.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i < offset)
        .last()
}

/// Start of the word segment left of `offset`, or 0.
///
/// Word segments follow UAX #29, so punctuation and individual CJK
/// ideographs count as their own stops.
pub fn word_boundary_left(s: &str, offset: usize) -> usize {
    s.split_word_bound_indices()
        .take_while(|&(i, _)| i < offset)
        .filter(|(_, seg)| !seg.chars().all(char::is_whitespace))
        .last()
        .map_or(0, |(i, _)| i)
}

/// Start of the word segment right of `offset`, or the end of `s`.
pub fn word_boundary_right(s: &str, offset: usize) -> usize {
    s.split_word_bound_indices()
        .skip_while(|&(i, _)| i <= offset)
        .find(|(_, seg)| !seg.chars().all(char::is_whitespace))
        .map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cells_not_chars() {
        assert_eq!(display_width("buy milk"), 8);
        assert_eq!(display_width("牛乳を買う"), 10);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn width_of_combining_sequence() {
        assert_eq!(display_width("cafe\u{301}"), 4);
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_to_width("pay rent", 20), "pay rent");
        assert_eq!(truncate_to_width("pay rent", 8), "pay rent");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("water the plants", 10), "water the\u{2026}");
    }

    #[test]
    fn truncate_respects_wide_graphemes() {
        // An ideograph is 2 cells and never split in half
        assert_eq!(truncate_to_width("牛乳を買う", 6), "牛乳\u{2026}");
        let out = truncate_to_width("牛乳を買う", 5);
        assert_eq!(out, "牛乳\u{2026}");
        assert!(display_width(&out) <= 5);
    }

    #[test]
    fn truncate_tiny_budgets() {
        assert_eq!(truncate_to_width("chores", 1), "\u{2026}");
        assert_eq!(truncate_to_width("chores", 0), "");
        assert_eq!(truncate_to_width("", 0), "");
    }

    #[test]
    fn grapheme_steps_ascii() {
        assert_eq!(next_grapheme_boundary("milk", 0), Some(1));
        assert_eq!(next_grapheme_boundary("milk", 3), Some(4));
        assert_eq!(next_grapheme_boundary("milk", 4), None);
        assert_eq!(prev_grapheme_boundary("milk", 4), Some(3));
        assert_eq!(prev_grapheme_boundary("milk", 1), Some(0));
        assert_eq!(prev_grapheme_boundary("milk", 0), None);
    }

    #[test]
    fn grapheme_steps_over_multibyte_clusters() {
        let s = "x🧺y";
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));

        let s = "cafe\u{301}s";
        assert_eq!(next_grapheme_boundary(s, 3), Some(6));
        assert_eq!(prev_grapheme_boundary(s, 6), Some(3));
    }

    #[test]
    fn zwj_sequence_is_one_step() {
        let s = "👩\u{200D}🌾!";
        let end = s.len() - 1;
        assert_eq!(next_grapheme_boundary(s, 0), Some(end));
        assert_eq!(prev_grapheme_boundary(s, end), Some(0));
    }

    #[test]
    fn word_left_stops_at_word_starts() {
        let s = "call the dentist";
        assert_eq!(word_boundary_left(s, 16), 9);
        assert_eq!(word_boundary_left(s, 9), 5);
        assert_eq!(word_boundary_left(s, 5), 0);
        assert_eq!(word_boundary_left(s, 3), 0); // mid-word
        assert_eq!(word_boundary_left(s, 0), 0);
    }

    #[test]
    fn word_right_stops_at_word_starts() {
        let s = "call the dentist";
        assert_eq!(word_boundary_right(s, 0), 5);
        assert_eq!(word_boundary_right(s, 5), 9);
        assert_eq!(word_boundary_right(s, 9), 16);
        assert_eq!(word_boundary_right(s, 12), 16); // mid-word
        assert_eq!(word_boundary_right(s, 16), 16);
    }

    #[test]
    fn punctuation_is_a_word_stop() {
        let s = "eggs, flour";
        assert_eq!(word_boundary_left(s, 11), 6);
        assert_eq!(word_boundary_left(s, 6), 4); // the comma
        assert_eq!(word_boundary_right(s, 0), 4);
    }

    #[test]
    fn ideographs_are_individual_word_stops() {
        let s = "buy 牛乳";
        assert_eq!(word_boundary_left(s, s.len()), 7);
        assert_eq!(word_boundary_right(s, 0), 4);
    }

    #[test]
    fn word_boundaries_on_blank_text() {
        assert_eq!(word_boundary_left("   ", 3), 0);
        assert_eq!(word_boundary_right("   ", 0), 3);
        assert_eq!(word_boundary_left("", 0), 0);
        assert_eq!(word_boundary_right("", 0), 0);
    }
}
