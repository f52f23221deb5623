use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("byte offset {0} is out of range")]
    OutOfRange(usize),
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    byte_offset: usize,
    width: u8,
}

/// Grapheme cluster index over an owned text buffer.
///
/// Positions handed to navigation and layout are cluster ordinals, not byte
/// or char offsets, so multi-codepoint sequences move as one unit. Widths are
/// display columns: 1, or 2 for fullwidth/wide clusters.
#[derive(Debug, Default, Clone)]
pub struct TextIndex {
    buf: String,
    clusters: Vec<Cluster>,
    cols: usize,
}

impl TextIndex {
    pub fn new(text: impl Into<String>) -> Self {
        let buf = text.into();
        let mut clusters = Vec::new();
        let mut cols = 0;
        for (byte_offset, grapheme) in buf.grapheme_indices(true) {
            let width = if grapheme.width() >= 2 { 2 } else { 1 };
            cols += width as usize;
            clusters.push(Cluster { byte_offset, width });
        }
        Self { buf, clusters, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of grapheme clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn bytes(&self) -> usize {
        self.buf.len()
    }

    /// Total display columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    fn byte_end(&self, pos: usize) -> usize {
        self.clusters
            .get(pos + 1)
            .map(|c| c.byte_offset)
            .unwrap_or(self.buf.len())
    }

    /// Text of the cluster at `pos`. Empty past the end.
    pub fn at(&self, pos: usize) -> &str {
        match self.clusters.get(pos) {
            Some(c) => &self.buf[c.byte_offset..self.byte_end(pos)],
            None => "",
        }
    }

    /// Display width (1 or 2) of the cluster at `pos`.
    pub fn width(&self, pos: usize) -> usize {
        self.clusters.get(pos).map(|c| c.width as usize).unwrap_or(0)
    }

    pub fn byte_offset(&self, pos: usize) -> usize {
        self.clusters
            .get(pos)
            .map(|c| c.byte_offset)
            .unwrap_or(self.buf.len())
    }

    /// Byte-range view of `n` clusters starting at cluster `pos`, clamped to
    /// the end of the buffer.
    pub fn substr(&self, pos: usize, n: usize) -> &str {
        if pos >= self.clusters.len() {
            return "";
        }
        let start = self.clusters[pos].byte_offset;
        let end = match pos.checked_add(n) {
            Some(e) if e < self.clusters.len() => self.clusters[e].byte_offset,
            _ => self.buf.len(),
        };
        &self.buf[start..end]
    }

    /// Summed display columns of `n` clusters starting at `pos`.
    pub fn cols_range(&self, pos: usize, n: usize) -> usize {
        let end = pos.saturating_add(n).min(self.clusters.len());
        (pos.min(end)..end).map(|i| self.clusters[i].width as usize).sum()
    }

    /// First cluster at or after `from` whose text equals `needle`.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        (from..self.clusters.len()).find(|&i| self.at(i) == needle)
    }

    /// Last cluster at or before `from` whose text equals `needle`. Never
    /// matches when starting at cluster zero, mirroring a reverse scan that
    /// has nothing behind it.
    pub fn rfind(&self, needle: &str, from: usize) -> Option<usize> {
        if from == 0 || from >= self.clusters.len() {
            return None;
        }
        (0..=from).rev().find(|&i| self.at(i) == needle)
    }

    /// Cluster containing the given byte offset. Offsets at or past the end
    /// of the buffer are a contract violation, not a clampable input.
    pub fn byte_to_cluster(&self, byte: usize) -> Result<usize, TextError> {
        if byte >= self.buf.len() {
            return Err(TextError::OutOfRange(byte));
        }
        let idx = self
            .clusters
            .partition_point(|c| c.byte_offset <= byte)
            .saturating_sub(1);
        Ok(idx)
    }
}
