use std::io::Read;

use log::debug;
use thiserror::Error;

use crate::text::TextIndex;

/// Word shown when a document has no tokens at all.
const PLACEHOLDER: &str = "reader";

const INDEX_MIN: usize = 1;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document contains no words")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cursor over a flattened token stream.
///
/// The buffer holds every word prefixed by a single space, so the space at
/// `cursor` is always the unambiguous left delimiter of the current word.
/// `index` is the 1-based ordinal of that word.
#[derive(Debug, Clone)]
pub struct WordNavigator {
    text: TextIndex,
    cursor: usize,
    index: usize,
    index_max: usize,
}

impl Default for WordNavigator {
    fn default() -> Self {
        let mut nav = Self {
            text: TextIndex::default(),
            cursor: 0,
            index: INDEX_MIN,
            index_max: INDEX_MIN,
        };
        let _ = nav.load("");
        nav
    }
}

impl WordNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the document. Whitespace runs collapse to single spaces; an
    /// empty document substitutes a one-word placeholder and reports
    /// `DocumentError::Empty` while leaving the navigator usable.
    pub fn load(&mut self, input: &str) -> Result<usize, DocumentError> {
        let mut buf = String::with_capacity(input.len() + 1);
        let mut count = 0usize;
        for word in input.split_whitespace() {
            buf.push(' ');
            buf.push_str(word);
            count += 1;
        }

        self.cursor = 0;
        self.index = INDEX_MIN;

        if count == 0 {
            buf.clear();
            buf.push(' ');
            buf.push_str(PLACEHOLDER);
            self.text = TextIndex::new(buf);
            self.index_max = 1;
            return Err(DocumentError::Empty);
        }

        self.text = TextIndex::new(buf);
        self.index_max = count;
        debug!("loaded document: {} words", count);
        Ok(count)
    }

    pub fn load_reader(&mut self, mut input: impl Read) -> Result<usize, DocumentError> {
        let mut buf = String::new();
        input.read_to_string(&mut buf)?;
        self.load(&buf)
    }

    pub fn text(&self) -> &TextIndex {
        &self.text
    }

    /// Byte offset of the space immediately preceding the current word.
    pub fn pos(&self) -> usize {
        self.text.byte_offset(self.cursor)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn index_max(&self) -> usize {
        self.index_max
    }

    pub fn eof(&self) -> bool {
        self.index >= self.index_max
    }

    /// Percent complete, floored.
    pub fn progress(&self) -> usize {
        (self.index as f64 / self.index_max as f64 * 100.0) as usize
    }

    /// Cluster span of the current word: start and length, excluding the
    /// leading space.
    pub fn current_word_span(&self) -> (usize, usize) {
        let start = self.cursor + 1;
        let end = self
            .text
            .find(" ", start)
            .unwrap_or_else(|| self.text.len());
        (start, end - start)
    }

    pub fn current_word(&self) -> &str {
        let (start, len) = self.current_word_span();
        self.text.substr(start, len)
    }

    pub fn next_word(&mut self) -> bool {
        if self.index < self.index_max {
            if let Some(pos) = self.text.find(" ", self.cursor + 1) {
                self.cursor = pos;
                self.index += 1;
                return true;
            }
        }
        false
    }

    pub fn prev_word(&mut self) -> bool {
        if self.index > INDEX_MIN {
            if let Some(pos) = self.text.rfind(" ", self.cursor - 1) {
                self.cursor = pos;
                self.index -= 1;
                return true;
            }
        }
        false
    }

    /// Clamps `i` to the valid range, then steps toward it. Linear in the
    /// distance moved; UI-driven jumps are rare and usually short.
    pub fn set_index(&mut self, i: usize) {
        let target = i.clamp(INDEX_MIN, self.index_max);
        while self.index < target {
            if !self.next_word() {
                break;
            }
        }
        while self.index > target {
            if !self.prev_word() {
                break;
            }
        }
    }

    pub fn begin(&mut self) {
        self.set_index(INDEX_MIN);
    }

    pub fn end(&mut self) {
        self.set_index(self.index_max);
    }

    fn at_sentence_end(&self) -> bool {
        self.current_word().contains(['.', '!', '?'])
    }

    /// Moves to the first word of the previous sentence.
    ///
    /// When already standing just past a terminal word, look back up to two
    /// words first so repeated invocations do not stall on the immediately
    /// preceding boundary.
    pub fn prev_sentence(&mut self) {
        if self.index == INDEX_MIN {
            return;
        }

        self.prev_word();
        if self.at_sentence_end() {
            self.prev_word();
            if self.at_sentence_end() {
                self.next_word();
                return;
            }
        }
        while self.index > INDEX_MIN {
            self.prev_word();
            if self.at_sentence_end() {
                self.next_word();
                break;
            }
        }
    }

    /// Moves to the first word after the next sentence terminator.
    pub fn next_sentence(&mut self) {
        if self.index == self.index_max {
            return;
        }

        while self.index < self.index_max {
            if self.at_sentence_end() {
                self.next_word();
                break;
            }
            self.next_word();
        }
    }

    /// Scans backward for a word that is exactly the literal token
    /// "chapter"; stops at the document start if none is found.
    pub fn prev_chapter(&mut self) {
        if self.index == INDEX_MIN {
            return;
        }

        while self.index > INDEX_MIN {
            self.prev_word();
            if self.current_word() == "chapter" {
                break;
            }
        }
    }

    pub fn next_chapter(&mut self) {
        if self.index == self.index_max {
            return;
        }

        while self.index < self.index_max {
            self.next_word();
            if self.current_word() == "chapter" {
                break;
            }
        }
    }
}
