use crate::nav::WordNavigator;
use crate::pacing::PacingClock;
use crate::timer::ReadTimer;

/// Human-readable session summary: elapsed time, average WPM, current WPM,
/// word index, percent complete.
pub fn summary(timer: &ReadTimer, clock: &PacingClock, nav: &WordNavigator) -> String {
    format!(
        "{} {}avg {}wpm {}w {}%",
        timer,
        clock.wpm_avg(),
        clock.wpm(),
        nav.index(),
        nav.progress()
    )
}
