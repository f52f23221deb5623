use log::debug;
use regex::RegexBuilder;
use thiserror::Error;

use crate::nav::WordNavigator;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Case-insensitive regex search over the navigator's document.
///
/// Matches are recorded as byte offsets and resolved to words by walking the
/// navigator cursor, so navigation cost is proportional to the distance
/// moved. The stored direction flips the meaning of `search_next` and
/// `search_prev`, vi-style.
#[derive(Debug, Default)]
pub struct SearchEngine {
    matches: Vec<usize>,
    forward: bool,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Compiles `pattern` and jumps to the first match in the requested
    /// direction. A failed compile clears any previous match list.
    pub fn search(
        &mut self,
        nav: &mut WordNavigator,
        pattern: &str,
        forward: bool,
    ) -> Result<bool, SearchError> {
        self.forward = forward;

        let rx = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(rx) => rx,
            Err(err) => {
                self.matches.clear();
                return Err(SearchError::InvalidPattern(err));
            }
        };

        self.matches = rx
            .find_iter(nav.text().as_str())
            .filter(|m| !m.is_empty())
            .map(|m| m.start())
            .collect();
        debug!("search {:?}: {} matches", pattern, self.matches.len());

        Ok(self.search_next(nav))
    }

    /// Moves toward the next match in the direction of the original search.
    /// False only when no match list is loaded; running out of matches keeps
    /// the cursor where it is.
    pub fn search_next(&self, nav: &mut WordNavigator) -> bool {
        if self.matches.is_empty() {
            return false;
        }

        if self.forward {
            self.scan_forward(nav);
        } else {
            self.scan_backward(nav);
        }

        true
    }

    /// Counterpart of `search_next`, walking against the search direction.
    pub fn search_prev(&self, nav: &mut WordNavigator) -> bool {
        if self.matches.is_empty() {
            return false;
        }

        if self.forward {
            self.scan_backward(nav);
        } else {
            self.scan_forward(nav);
        }

        true
    }

    // Walk the cursor forward to the first match past it, then step back one
    // word so the match's containing word becomes current. A cursor that ran
    // into the end of the document stays there.
    fn scan_forward(&self, nav: &mut WordNavigator) {
        let index = nav.index();
        let mut hit_end = false;
        nav.next_word();

        for &m in &self.matches {
            if m > nav.pos() {
                while nav.pos() < m {
                    if !nav.next_word() {
                        hit_end = true;
                        break;
                    }
                }
                break;
            }
        }

        let index_new = nav.index();
        if index != nav.index_max()
            && (!hit_end || (index_new != index && index_new != nav.index_max()))
        {
            nav.prev_word();
        }
    }

    // Walk the cursor back to the last match at or before it.
    fn scan_backward(&self, nav: &mut WordNavigator) {
        let mut target = self.matches[0];
        for &m in &self.matches {
            if m > nav.pos() {
                break;
            }
            target = m;
        }

        while nav.pos() > target {
            if !nav.prev_word() {
                break;
            }
        }
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

    #[test]
    fn forward_search_walks_matches_in_order() {
        let mut n = nav("the quick brown fox quick again");
        let mut s = SearchEngine::new();

        assert!(s.search(&mut n, "quick", true).unwrap());
        assert_eq!(n.index(), 2);
        assert_eq!(n.current_word(), "quick");

        assert!(s.search_next(&mut n));
        assert_eq!(n.index(), 5);
        assert_eq!(n.current_word(), "quick");

        // exhausted: still true, cursor unmoved
        assert!(s.search_next(&mut n));
        assert_eq!(n.index(), 5);
    }

    #[test]
    fn search_prev_walks_backward_through_matches() {
        let mut n = nav("the quick brown fox quick again");
        let mut s = SearchEngine::new();

        s.search(&mut n, "quick", true).unwrap();
        s.search_next(&mut n);
        assert_eq!(n.index(), 5);

        assert!(s.search_prev(&mut n));
        assert_eq!(n.index(), 2);

        // at the first match already: stays
        assert!(s.search_prev(&mut n));
        assert_eq!(n.index(), 2);
    }

    #[test]
    fn backward_search_reverses_direction() {
        let mut n = nav("the quick brown fox quick again");
        n.end();
        let mut s = SearchEngine::new();

        assert!(s.search(&mut n, "quick", false).unwrap());
        assert_eq!(n.index(), 5);

        // with a backward search, search_next continues backward
        assert!(s.search_next(&mut n));
        assert_eq!(n.index(), 2);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut n = nav("alpha BRAVO charlie");
        let mut s = SearchEngine::new();
        s.search(&mut n, "bravo", true).unwrap();
        assert_eq!(n.current_word(), "BRAVO");
    }

    #[test]
    fn invalid_pattern_clears_matches() {
        let mut n = nav("one two three");
        let mut s = SearchEngine::new();
        s.search(&mut n, "two", true).unwrap();
        assert!(s.has_matches());

        assert!(matches!(
            s.search(&mut n, "(unclosed", true),
            Err(SearchError::InvalidPattern(_))
        ));
        assert!(!s.has_matches());
        assert!(!s.search_next(&mut n));
    }

    #[test]
    fn no_matches_reports_false() {
        let mut n = nav("one two three");
        let mut s = SearchEngine::new();
        assert!(!s.search(&mut n, "missing", true).unwrap());
        assert_eq!(n.index(), 1);
    }

    #[test]
    fn no_pattern_loaded_reports_false() {
        let mut n = nav("one two");
        let s = SearchEngine::new();
        assert!(!s.search_next(&mut n));
        assert!(!s.search_prev(&mut n));
    }

    #[test]
    fn match_resolves_to_containing_word() {
        // match starts inside "hyphen-ated"
        let mut n = nav("plain hyphen-ated tail");
        let mut s = SearchEngine::new();
        s.search(&mut n, "ated", true).unwrap();
        assert_eq!(n.current_word(), "hyphen-ated");
    }
}
