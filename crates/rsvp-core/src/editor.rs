use crate::text::TextIndex;

const HISTORY_MAX: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    HistoryPrev,
    HistoryNext,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Visible window of the editor buffer. Edges clipped out of view are
/// flagged so the renderer can substitute `<`/`>` markers; `cursor_col` is
/// the cursor's display column within `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub text: String,
    pub cursor_col: usize,
    pub clipped_left: bool,
    pub clipped_right: bool,
}

/// Single-line input with a horizontal scroll window and linear history,
/// used for command and search prompts. Independent of the reading engine.
///
/// The cursor is `offset + index`: `offset` is the first visible cluster and
/// `index` the cursor's distance into the window. Edits adjust `offset`
/// rather than letting `index` leave `[0, width - 2]`.
#[derive(Debug, Clone)]
pub struct LineEditor {
    width: usize,
    buf: TextIndex,
    offset: usize,
    index: usize,
    history: Vec<String>,
    hist_idx: usize,
    stash: String,
}

impl LineEditor {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(4),
            buf: TextIndex::default(),
            offset: 0,
            index: 0,
            history: Vec::new(),
            hist_idx: 0,
            stash: String::new(),
        }
    }

    /// Resets the buffer for a new prompt interaction. History persists.
    pub fn start(&mut self) {
        self.buf = TextIndex::default();
        self.offset = 0;
        self.index = 0;
        self.stash.clear();
        self.hist_idx = self.history.len();
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(4);
    }

    pub fn contents(&self) -> &str {
        self.buf.as_str()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn cursor(&self) -> usize {
        self.offset + self.index
    }

    fn set_buf(&mut self, text: String) {
        self.buf = TextIndex::new(text);
        self.jump_to_end();
    }

    // Places the cursor after the last cluster, scrolling so the window
    // ending there fits in `width - 2` columns. `offset + index` never
    // exceeds `buf.len()`.
    fn jump_to_end(&mut self) {
        let limit = self.width - 2;
        let mut start = self.buf.len();
        let mut cols = 0;
        while start > 0 && cols + self.buf.width(start - 1) <= limit {
            start -= 1;
            cols += self.buf.width(start);
        }
        self.offset = start;
        self.index = self.buf.len() - start;
    }

    fn remove_cluster(&mut self, pos: usize) {
        let start = self.buf.byte_offset(pos);
        let end = self.buf.byte_offset(pos + 1);
        let mut s = self.buf.as_str().to_string();
        s.replace_range(start..end, "");
        self.buf = TextIndex::new(s);
    }

    pub fn handle(&mut self, key: Key) -> EditorStatus {
        match key {
            Key::Insert(c) => {
                if !c.is_control() {
                    let at = self.buf.byte_offset(self.cursor());
                    let mut s = self.buf.as_str().to_string();
                    s.insert(at, c);
                    self.buf = TextIndex::new(s);
                    if self.index + 2 < self.width {
                        self.index += 1;
                    } else {
                        self.offset += 1;
                    }
                    self.hist_idx = self.history.len();
                }
                EditorStatus::Editing
            }
            Key::Backspace => {
                if self.buf.is_empty() {
                    // backspacing an empty prompt closes it
                    return self.finish(false);
                }
                if self.cursor() > 0 {
                    self.remove_cluster(self.cursor() - 1);
                    if self.offset > 0 {
                        self.offset -= 1;
                    } else {
                        self.index -= 1;
                    }
                    self.hist_idx = self.history.len();
                }
                EditorStatus::Editing
            }
            Key::Delete => {
                if self.buf.is_empty() {
                    return self.finish(false);
                }
                if self.cursor() < self.buf.len() {
                    self.remove_cluster(self.cursor());
                    self.hist_idx = self.history.len();
                } else if self.cursor() > 0 {
                    self.remove_cluster(self.cursor() - 1);
                    if self.offset > 0 {
                        self.offset -= 1;
                    } else {
                        self.index -= 1;
                    }
                    self.hist_idx = self.history.len();
                }
                EditorStatus::Editing
            }
            Key::Left => {
                if self.offset > 0 {
                    self.offset -= 1;
                } else if self.index > 0 {
                    self.index -= 1;
                }
                EditorStatus::Editing
            }
            Key::Right => {
                if self.cursor() < self.buf.len() {
                    if self.index + 2 < self.width {
                        self.index += 1;
                    } else {
                        self.offset += 1;
                    }
                }
                EditorStatus::Editing
            }
            Key::Home => {
                self.offset = 0;
                self.index = 0;
                EditorStatus::Editing
            }
            Key::End => {
                if self.cursor() < self.buf.len() {
                    self.jump_to_end();
                }
                EditorStatus::Editing
            }
            Key::HistoryPrev => {
                self.hist_prev();
                EditorStatus::Editing
            }
            Key::HistoryNext => {
                self.hist_next();
                EditorStatus::Editing
            }
            Key::Submit => self.finish(false),
            Key::Cancel => self.finish(true),
        }
    }

    // Ends the interaction. The trimmed buffer enters history even when
    // cancelled; only the returned value is suppressed.
    fn finish(&mut self, cancelled: bool) -> EditorStatus {
        let result = self.buf.as_str().trim().to_string();
        self.push_history(&result);
        if cancelled {
            EditorStatus::Cancelled
        } else {
            EditorStatus::Submitted(result)
        }
    }

    fn push_history(&mut self, entry: &str) {
        if !entry.is_empty() && self.history.last().map(String::as_str) != Some(entry) {
            if let Some(pos) = self.history.iter().position(|h| h == entry) {
                self.history.remove(pos);
            }
            self.history.push(entry.to_string());
            if self.history.len() > HISTORY_MAX {
                self.history.remove(0);
            }
        }
        self.hist_idx = self.history.len();
    }

    fn hist_prev(&mut self) {
        if self.hist_idx > 0 {
            if self.hist_idx == self.history.len() {
                self.stash = self.buf.as_str().to_string();
            }
            self.hist_idx -= 1;
            self.set_buf(self.history[self.hist_idx].clone());
        }
    }

    fn hist_next(&mut self) {
        if self.hist_idx < self.history.len() {
            self.hist_idx += 1;
            let text = if self.hist_idx == self.history.len() {
                self.stash.clone()
            } else {
                self.history[self.hist_idx].clone()
            };
            self.set_buf(text);
        }
    }

    /// Window of the buffer currently in view, sized so the cursor's display
    /// column stays within `[0, width - 2]`.
    pub fn view(&self) -> EditorView {
        let limit = self.width - 2;
        let cur = self.cursor();

        if self.buf.cols() + 2 <= self.width {
            return EditorView {
                text: self.buf.as_str().to_string(),
                cursor_col: self.buf.cols_range(0, cur),
                clipped_left: false,
                clipped_right: false,
            };
        }

        // window ending at the cursor
        let mut start = cur;
        let mut cols = 0;
        while start > 0 && cols < limit {
            start -= 1;
            cols += self.buf.width(start);
        }

        // a wide cluster may have overshot the limit
        while cols > limit && start < cur {
            cols -= self.buf.width(start);
            start += 1;
        }

        let cursor_col = cols;

        // fill the remaining window to the right of the cursor
        let mut end = cur;
        while end < self.buf.len() {
            let w = self.buf.width(end);
            if cols + w > limit {
                break;
            }
            cols += w;
            end += 1;
        }

        EditorView {
            text: self.buf.substr(start, end - start).to_string(),
            cursor_col,
            clipped_left: start > 0,
            clipped_right: end < self.buf.len(),
        }
    }
}
