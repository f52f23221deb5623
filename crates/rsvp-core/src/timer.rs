use std::fmt;
use std::time::{Duration, Instant};

/// Accumulating wall-clock timer for the reading session. Display renders
/// elapsed time as colon-separated units, largest first (`1h:2m:3s`).
#[derive(Debug, Clone)]
pub struct ReadTimer {
    running: bool,
    started: Instant,
    total: Duration,
}

impl Default for ReadTimer {
    fn default() -> Self {
        Self {
            running: false,
            started: Instant::now(),
            total: Duration::ZERO,
        }
    }
}

impl ReadTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.started = Instant::now();
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.total += self.started.elapsed();
            self.running = false;
        }
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.total = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.total + self.started.elapsed()
        } else {
            self.total
        }
    }
}

fn format_seconds(mut sec: u64) -> String {
    const UNITS: &[(u64, &str)] = &[
        (2_626_560 * 12, "Y"),
        (2_626_560, "M"), // 30.4 days
        (604_800, "W"),
        (86_400, "D"),
        (3_600, "h"),
        (60, "m"),
        (1, "s"),
    ];

    let mut out = String::new();
    for &(unit, tag) in UNITS {
        if sec >= unit {
            let n = sec / unit;
            sec -= n * unit;
            out.push_str(&n.to_string());
            out.push_str(tag);
            out.push(':');
        }
    }

    if out.is_empty() {
        return "0s".into();
    }

    out.pop();
    out
}

impl fmt::Display for ReadTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_seconds(self.elapsed().as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_seconds(0), "0s");
    }

    #[test]
    fn formats_mixed_units() {
        assert_eq!(format_seconds(59), "59s");
        assert_eq!(format_seconds(60), "1m");
        assert_eq!(format_seconds(3723), "1h:2m:3s");
        assert_eq!(format_seconds(86_400 + 61), "1D:1m:1s");
    }

    #[test]
    fn stopped_timer_does_not_advance() {
        let mut t = ReadTimer::new();
        t.start();
        t.stop();
        let frozen = t.elapsed();
        assert_eq!(t.elapsed(), frozen);
        t.reset();
        assert_eq!(t.elapsed(), Duration::ZERO);
        assert!(!t.is_running());
    }
}
