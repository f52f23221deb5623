use crate::text::TextIndex;

pub const WPM_MIN: u32 = 60;
pub const WPM_MAX: u32 = 1200;
pub const WPM_STEP: u32 = 10;
pub const WPM_DEFAULT: u32 = 250;

/// Converts words-per-minute and word shape into per-word wait times, and
/// tracks the running average of the instantaneous pace.
#[derive(Debug, Clone)]
pub struct PacingClock {
    wpm: u32,
    wpm_avg: u32,
    total: u64,
    count: u64,
    wait_ms: u64,
    slow: bool,
}

impl Default for PacingClock {
    fn default() -> Self {
        Self {
            wpm: WPM_DEFAULT,
            wpm_avg: 0,
            total: 0,
            count: 0,
            wait_ms: 0,
            slow: false,
        }
    }
}

// Trailing punctuation that earns a word double the base wait.
fn ends_with_pause_punct(word: &TextIndex) -> bool {
    for i in (0..word.len()).rev() {
        let cluster = word.at(i);
        if cluster.chars().next().is_some_and(char::is_alphabetic) {
            break;
        }
        if matches!(
            cluster,
            "," | "." | ";" | ":" | "?" | "!" | "\"" | "-" | ")" | "\u{2026}"
        ) {
            return true;
        }
    }
    false
}

impl PacingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait in milliseconds before advancing past `word`. Long words scale
    /// up slightly, punctuation-terminated words double. Always at least 1.
    pub fn wait_for(&mut self, word: &str) -> u64 {
        let word = TextIndex::new(word);
        let base = (60_000 / self.wpm) as f64;
        let scaled = base * (1.0 + 0.04 * (word.len() / 100) as f64);

        let mut wait = if ends_with_pause_punct(&word) {
            scaled * 2.0
        } else {
            scaled
        };
        if self.slow {
            wait *= 1.10;
        }

        self.wait_ms = (wait as u64).max(1);
        self.wait_ms
    }

    /// Folds an observed wait into the running average WPM.
    pub fn record_sample(&mut self, wait_ms: u64) {
        if wait_ms == 0 {
            return;
        }
        self.total += 60_000 / wait_ms;
        self.count += 1;
        self.wpm_avg = (self.total / self.count) as u32;
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn wpm_avg(&self) -> u32 {
        self.wpm_avg
    }

    pub fn last_wait(&self) -> u64 {
        self.wait_ms
    }

    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = wpm.clamp(WPM_MIN, WPM_MAX);
    }

    pub fn inc_wpm(&mut self) {
        self.set_wpm(self.wpm.saturating_add(WPM_STEP));
    }

    pub fn dec_wpm(&mut self) {
        self.set_wpm(self.wpm.saturating_sub(WPM_STEP));
    }

    pub fn set_slow(&mut self, slow: bool) {
        self.slow = slow;
    }

    pub fn slow(&self) -> bool {
        self.slow
    }

    pub fn reset_average(&mut self) {
        self.total = 0;
        self.count = 0;
        self.wpm_avg = 0;
    }
}
