use crate::nav::WordNavigator;
use crate::text::TextIndex;

const SHOW_MIN: usize = 0;
const SHOW_MAX: usize = 60;

/// Display-ready line fragments surrounding the current word. `prev` is
/// left-padded and `next` right-padded so the focus cluster always lands on
/// the same screen column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Line {
    pub prev: String,
    pub curr: String,
    pub next: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ShowMode {
    pub full_line: bool,
    show_prev: usize,
    show_next: usize,
}

impl Default for ShowMode {
    fn default() -> Self {
        Self {
            full_line: false,
            show_prev: 1,
            show_next: 1,
        }
    }
}

impl ShowMode {
    /// Full-line mode: surrounding context is raw document text rather than
    /// a fixed number of words.
    pub fn full() -> Self {
        Self {
            full_line: true,
            ..Self::default()
        }
    }

    pub fn show_prev(&self) -> usize {
        self.show_prev
    }

    pub fn show_next(&self) -> usize {
        self.show_next
    }

    pub fn set_show_prev(&mut self, val: usize) {
        if (SHOW_MIN..=SHOW_MAX).contains(&val) {
            self.show_prev = val;
        }
    }

    pub fn set_show_next(&mut self, val: usize) {
        if (SHOW_MIN..=SHOW_MAX).contains(&val) {
            self.show_next = val;
        }
    }
}

/// Recognition point of a word: the cluster aligned to the fixed screen
/// column, plus the display columns occupied by the word before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPoint {
    pub index: usize,
    pub prefix_width: usize,
}

fn is_alpha_cluster(cluster: &str) -> bool {
    cluster.chars().next().is_some_and(char::is_alphabetic)
}

fn is_apostrophe_cluster(cluster: &str) -> bool {
    matches!(cluster, "'" | "\u{2019}")
}

/// Computes the focus point of a word.
///
/// Runs of leading and trailing punctuation are stripped before measuring;
/// a trailing `s` directly preceded by an apostrophe is stripped with the suffix
/// (possessives). The focus index is `round(core_len * 0.25)` for cores
/// shorter than 13 clusters, 3 otherwise, shifted back by the stripped lead.
pub fn focus_point(word: &str) -> FocusPoint {
    let word = TextIndex::new(word);
    let len = word.len();

    let mut lead = 0;
    for i in 0..len {
        if is_alpha_cluster(word.at(i)) {
            break;
        }
        lead += 1;
    }

    let mut end = len;
    for i in (0..len).rev() {
        if is_alpha_cluster(word.at(i)) {
            if word.at(i) == "s" && i > 0 && is_apostrophe_cluster(word.at(i - 1)) {
                end -= 2;
            }
            break;
        }
        end -= 1;
    }

    let mut core_len = end.saturating_sub(lead);
    if core_len == 0 || core_len > len {
        core_len = len;
    }

    let mut index = if core_len < 13 {
        (core_len as f64 * 0.25).round() as usize
    } else {
        3
    };

    if core_len != len {
        index += lead;
    }

    FocusPoint {
        index,
        prefix_width: word.cols_range(0, index),
    }
}

// Column-measured window ending at the cluster `until` (inclusive), at most
// `budget` display columns wide. Whole clusters only: an overshooting wide
// cluster is left out and becomes padding.
fn window_back(text: &TextIndex, until: usize, budget: usize) -> usize {
    let mut start = until + 1;
    let mut cols = 0;
    while start > 0 {
        let w = text.width(start - 1);
        if cols + w > budget {
            break;
        }
        cols += w;
        start -= 1;
    }
    start
}

// Forward counterpart: number of clusters from `from` fitting `budget`.
fn window_fwd(text: &TextIndex, from: usize, budget: usize) -> usize {
    let mut n = 0;
    let mut cols = 0;
    while from + n < text.len() {
        let w = text.width(from + n);
        if cols + w > budget {
            break;
        }
        cols += w;
        n += 1;
    }
    n
}

fn prev_context<'a>(
    nav: &'a WordNavigator,
    mode: &ShowMode,
    budget: usize,
) -> &'a str {
    let text = nav.text();
    let (wstart, _) = nav.current_word_span();
    let cursor = wstart - 1;

    if cursor == 0 || budget == 0 {
        return "";
    }

    // The window ends at the word's leading space, inclusive.
    let min = window_back(text, cursor, budget);

    if mode.full_line {
        return text.substr(min, cursor + 1 - min);
    }

    // Word-count mode: step back whole words, then clip to the same budget.
    let mut p = cursor;
    for _ in 0..mode.show_prev {
        match text.rfind(" ", p.saturating_sub(1)) {
            Some(0) | None => {
                p = 0;
                break;
            }
            Some(q) => p = q,
        }
    }

    let start = p.max(min);
    text.substr(start, cursor + 1 - start)
}

fn next_context<'a>(
    nav: &'a WordNavigator,
    mode: &ShowMode,
    budget: usize,
) -> &'a str {
    let text = nav.text();
    let (wstart, wlen) = nav.current_word_span();

    let space = wstart + wlen;
    if space >= text.len() || budget == 0 {
        return "";
    }

    // The window starts at the space following the word.
    let max = window_fwd(text, space, budget);

    if mode.full_line {
        return text.substr(space, max);
    }

    let mut p = space;
    for _ in 0..mode.show_next {
        match text.find(" ", p + 1) {
            Some(q) => p = q,
            None => {
                p = text.len() - 1;
                break;
            }
        }
    }

    let n = (p - space + 1).min(max);
    text.substr(space, n)
}

/// Builds the render line for the navigator's current word.
///
/// `width` is the full display width in columns; `offset` shifts the focus
/// column horizontally. The focus cluster lands exactly at column
/// `width / 2 - 1 - offset`.
pub fn build_line(nav: &WordNavigator, width: usize, mode: &ShowMode, offset: usize) -> Line {
    let text = nav.text();
    let (wstart, wlen) = nav.current_word_span();
    let word = text.substr(wstart, wlen);
    let word_width = text.cols_range(wstart, wlen);
    let focus = focus_point(word);

    let left = (width / 2).saturating_sub(1 + offset);
    let mut right = width / 2 + 1 + offset;
    if width % 2 != 0 {
        right += 1;
    }

    let prev_budget = left.saturating_sub(focus.prefix_width);
    let next_budget = right.saturating_sub(word_width - focus.prefix_width);

    let show_prev = mode.full_line || mode.show_prev > 0;
    let show_next = mode.full_line || mode.show_next > 0;

    let prev = if show_prev {
        prev_context(nav, mode, prev_budget)
    } else {
        ""
    };
    let next = if show_next {
        next_context(nav, mode, next_budget)
    } else {
        ""
    };

    let prev_cols = TextIndex::new(prev).cols();
    let next_cols = TextIndex::new(next).cols();

    let pad_left = left
        .saturating_sub(focus.prefix_width)
        .saturating_sub(prev_cols);
    let pad_right = right
        .saturating_sub(word_width - focus.prefix_width)
        .saturating_sub(next_cols);

    Line {
        prev: format!("{}{}", " ".repeat(pad_left), prev),
        curr: word.to_string(),
        next: format!("{}{}", next, " ".repeat(pad_right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(text: &str) -> WordNavigator {
        let mut nav = WordNavigator::new();
        nav.load(text).unwrap();
        nav
    }

    fn full_line() -> ShowMode {
        ShowMode::full()
    }

    #[test]
    fn focus_point_strips_trailing_punctuation() {
        let fp = focus_point("jumps.");
        assert_eq!(fp.index, 1);
        assert_eq!(fp.prefix_width, 1);
    }

    #[test]
    fn focus_point_plain_word() {
        let fp = focus_point("chapter");
        assert_eq!(fp.index, 2);
        assert_eq!(fp.prefix_width, 2);
    }

    #[test]
    fn focus_point_skips_leading_punctuation() {
        // core "word" (4) -> round(1.0) = 1, shifted by the stripped lead
        let fp = focus_point("\"word\"");
        assert_eq!(fp.index, 2);
    }

    #[test]
    fn focus_point_strips_possessive_suffix() {
        // core "it" (2) -> round(0.5) = 1
        let fp = focus_point("it's");
        assert_eq!(fp.index, 1);
        // curly apostrophe strips the same way
        assert_eq!(focus_point("it\u{2019}s").index, 1);
    }

    #[test]
    fn double_quote_before_trailing_s_is_not_possessive() {
        // core stays "word\"s" (6) -> round(1.5) = 2, not the stripped 1
        let fp = focus_point("word\"s");
        assert_eq!(fp.index, 2);
    }

    #[test]
    fn focus_point_all_punctuation_falls_back_to_full_length() {
        let fp = focus_point("---");
        assert_eq!(fp.index, 1);
    }

    #[test]
    fn focus_point_long_word_is_fixed() {
        let fp = focus_point("extraordinarily");
        assert_eq!(fp.index, 3);
    }

    #[test]
    fn focus_point_wide_prefix_counts_columns() {
        // 3 ideographs, focus index round(3 * 0.25) = 1, one wide cluster before
        let fp = focus_point("日本語");
        assert_eq!(fp.index, 1);
        assert_eq!(fp.prefix_width, 2);
    }

    #[test]
    fn line_centers_focus_cluster() {
        let mut n = nav("the quick brown fox");
        n.set_index(2);
        let line = build_line(&n, 20, &full_line(), 0);

        assert_eq!(line.curr, "quick");
        assert_eq!(line.prev, "    the ");
        assert_eq!(line.next, " brown ");
        // focus cluster "u" sits at column width/2 - 1 = 9
        assert_eq!(line.prev.len() + focus_point("quick").index, 9);
    }

    #[test]
    fn line_pads_fully_at_document_edges() {
        let mut n = nav("solitary");
        n.begin();
        let line = build_line(&n, 20, &full_line(), 0);

        let fp = focus_point("solitary");
        assert_eq!(line.prev, " ".repeat(9 - fp.prefix_width));
        assert_eq!(line.curr, "solitary");
        assert_eq!(line.next, " ".repeat(11 - (8 - fp.prefix_width)));
    }

    #[test]
    fn word_count_mode_collects_whole_words() {
        let mut n = nav("one two three four five");
        n.set_index(3);
        let mut mode = ShowMode::default();
        mode.set_show_prev(1);
        mode.set_show_next(1);
        let line = build_line(&n, 40, &mode, 0);

        assert_eq!(line.prev.trim_start(), "two ");
        assert_eq!(line.next.trim_end(), " four");
    }

    #[test]
    fn zero_show_counts_render_word_alone() {
        let mut n = nav("one two three");
        n.set_index(2);
        let mut mode = ShowMode::default();
        mode.set_show_prev(0);
        mode.set_show_next(0);
        let line = build_line(&n, 20, &mode, 0);

        assert!(line.prev.chars().all(|c| c == ' '));
        assert!(line.next.chars().all(|c| c == ' '));
        assert_eq!(line.curr, "two");
    }

    #[test]
    fn show_counts_reject_out_of_range_values() {
        let mut mode = ShowMode::default();
        mode.set_show_prev(61);
        assert_eq!(mode.show_prev(), 1);
        mode.set_show_next(60);
        assert_eq!(mode.show_next(), 60);
    }

    #[test]
    fn wide_clusters_never_split_at_window_edge() {
        let mut n = nav("日本 語学 校舎");
        n.set_index(2);
        // budget leaves room for part of a wide cluster only; it must be
        // replaced by padding, not split
        let line = build_line(&n, 10, &full_line(), 0);
        let prev_cols = TextIndex::new(line.prev.as_str()).cols();
        let fp = focus_point("語学");
        assert_eq!(prev_cols + fp.prefix_width, 4);
        assert_eq!(line.curr, "語学");
    }

    #[test]
    fn odd_width_extends_right_side() {
        let mut n = nav("alpha beta gamma");
        n.set_index(2);
        let even = build_line(&n, 20, &full_line(), 0);
        let odd = build_line(&n, 21, &full_line(), 0);
        let cols = |s: &str| TextIndex::new(s).cols();
        assert_eq!(
            cols(&odd.next) + cols(&odd.curr) + cols(&odd.prev),
            cols(&even.next) + cols(&even.curr) + cols(&even.prev) + 1
        );
    }

    #[test]
    fn horizontal_offset_shifts_focus_column() {
        let mut n = nav("the quick brown fox");
        n.set_index(2);
        let line = build_line(&n, 20, &full_line(), 2);
        assert_eq!(line.prev.len() + focus_point("quick").index, 7);
    }
}
