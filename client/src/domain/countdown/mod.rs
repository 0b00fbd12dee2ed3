//! Promotion countdown: remaining-time bookkeeping, formatting and urgency.
//!
//! [`CountdownState`] is the pure state machine; [`CountdownTimer`] drives it
//! from a background task at a fixed one-second cadence.

use chrono::{DateTime, Utc};
use mockable::Clock;

mod timer;

pub use timer::{CountdownTimer, TickSleeper, TokioSleeper};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// How pressing the remaining time is, for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// One hour or less remains.
    Critical,
    /// One day or less remains.
    Warning,
    /// More than a day remains.
    Normal,
}

impl Urgency {
    /// Classify a remaining duration in seconds.
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::Urgency;
    ///
    /// assert_eq!(Urgency::classify(3_600), Urgency::Critical);
    /// assert_eq!(Urgency::classify(3_601), Urgency::Warning);
    /// assert_eq!(Urgency::classify(86_401), Urgency::Normal);
    /// ```
    pub const fn classify(seconds: u64) -> Self {
        if seconds <= SECS_PER_HOUR {
            Self::Critical
        } else if seconds <= SECS_PER_DAY {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Render `seconds` using its most significant units.
///
/// Days show days, hours and minutes; hours show hours, minutes and
/// seconds; minutes show minutes and seconds; anything shorter shows
/// seconds only.
///
/// # Examples
/// ```
/// use booking_client::domain::format_remaining;
///
/// assert_eq!(format_remaining(3_661), "1h 1m 1s");
/// assert_eq!(format_remaining(90_061), "1d 1h 1m");
/// assert_eq!(format_remaining(42), "42s");
/// ```
pub fn format_remaining(seconds: u64) -> String {
    let days = seconds.div_euclid(SECS_PER_DAY);
    let hours = seconds.rem_euclid(SECS_PER_DAY).div_euclid(SECS_PER_HOUR);
    let minutes = seconds.rem_euclid(SECS_PER_HOUR).div_euclid(SECS_PER_MINUTE);
    let secs = seconds.rem_euclid(SECS_PER_MINUTE);

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Seconds from now until `expires_at`; negative once it has passed.
pub fn seconds_until(expires_at: DateTime<Utc>, clock: &dyn Clock) -> i64 {
    (expires_at - clock.utc()).num_seconds()
}

/// What a countdown renders while time remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    remaining: u64,
    text: String,
    urgency: Urgency,
}

impl CountdownDisplay {
    fn for_remaining(remaining: u64) -> Option<Self> {
        (remaining > 0).then(|| Self {
            remaining,
            text: format_remaining(remaining),
            urgency: Urgency::classify(remaining),
        })
    }

    /// Seconds left.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Formatted remaining time.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Presentation urgency.
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }
}

/// Remaining time of one countdown display.
///
/// Negative seeds clamp to zero. Ticking requires the display to be mounted
/// and stops for good at zero until the next reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    time_left: u64,
    mounted: bool,
}

impl CountdownState {
    /// Seed a countdown that is not yet mounted.
    pub fn new(time_remaining: i64) -> Self {
        Self {
            time_left: clamp_seed(time_remaining),
            mounted: false,
        }
    }

    /// Replace the remaining time with a new authoritative value.
    pub fn reseed(&mut self, time_remaining: i64) {
        self.time_left = clamp_seed(time_remaining);
    }

    /// Mark the owning display as mounted.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Advance by one second. Returns whether the state changed.
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        true
    }

    /// Whether further ticks should be scheduled.
    pub fn is_ticking(&self) -> bool {
        self.mounted && self.time_left > 0
    }

    /// Seconds left.
    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    /// Whether the owning display is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Output to render; nothing before mount or once expired.
    pub fn display(&self) -> Option<CountdownDisplay> {
        if !self.mounted {
            return None;
        }
        CountdownDisplay::for_remaining(self.time_left)
    }
}

fn clamp_seed(time_remaining: i64) -> u64 {
    u64::try_from(time_remaining).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    //! Pure countdown behaviour.

    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(3_661, "1h 1m 1s")]
    #[case(90_061, "1d 1h 1m")]
    #[case(86_400, "1d 0h 0m")]
    #[case(3_600, "1h 0m 0s")]
    #[case(61, "1m 1s")]
    #[case(59, "59s")]
    #[case(0, "0s")]
    fn formats_most_significant_units_first(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_remaining(seconds), expected);
    }

    #[rstest]
    #[case(1, Urgency::Critical)]
    #[case(3_600, Urgency::Critical)]
    #[case(3_601, Urgency::Warning)]
    #[case(86_400, Urgency::Warning)]
    #[case(86_401, Urgency::Normal)]
    fn classifies_urgency_by_hours_left(#[case] seconds: u64, #[case] expected: Urgency) {
        assert_eq!(Urgency::classify(seconds), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn expired_or_negative_seed_renders_nothing(#[case] seed: i64) {
        let mut state = CountdownState::new(seed);
        state.mount();

        assert_eq!(state.time_left(), 0);
        assert_eq!(state.display(), None);
        assert!(!state.tick());
    }

    #[test]
    fn renders_nothing_before_mount() {
        let mut state = CountdownState::new(30);

        assert_eq!(state.display(), None);
        assert!(!state.tick(), "unmounted countdowns do not tick");
        assert_eq!(state.time_left(), 30);
    }

    #[test]
    fn ticks_down_to_zero_and_stops() {
        let mut state = CountdownState::new(2);
        state.mount();

        assert!(state.tick());
        assert_eq!(state.display().map(|d| d.text().to_owned()), Some("1s".to_owned()));
        assert!(state.tick());
        assert!(!state.tick());
        assert_eq!(state.time_left(), 0);
        assert_eq!(state.display(), None);
    }

    #[test]
    fn reseed_replaces_remaining_time() {
        let mut state = CountdownState::new(5);
        state.mount();
        state.tick();

        state.reseed(90_061);

        let display = state.display().expect("time remains");
        assert_eq!(display.remaining(), 90_061);
        assert_eq!(display.text(), "1d 1h 1m");
        assert_eq!(display.urgency(), Urgency::Normal);
    }

    #[test]
    fn seconds_until_uses_injected_clock() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).single().expect("now");
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);

        let expires = now + chrono::Duration::seconds(3_661);

        assert_eq!(seconds_until(expires, &clock), 3_661);
        assert_eq!(seconds_until(now - chrono::Duration::seconds(10), &clock), -10);
    }
}
