//! Decorative deals countdown.

use core::fmt;

/// An hours/minutes/seconds countdown that stops at zero.
///
/// The deals rail header starts one at 12:45:30 and ticks it once a second
/// in the browser; the value has no effect on any listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    hours: u32,
    minutes: u8,
    seconds: u8,
}

impl Countdown {
    /// The value every page load starts from.
    pub const DEALS_START: Self = Self {
        hours: 12,
        minutes: 45,
        seconds: 30,
    };

    /// Build a countdown, carrying overflowing seconds and minutes upward.
    #[must_use]
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        let total = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
        Self::from_total_seconds(total)
    }

    fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: u32::try_from(total / 3600).unwrap_or(u32::MAX),
            minutes: u8::try_from((total % 3600) / 60).unwrap_or_default(),
            seconds: u8::try_from(total % 60).unwrap_or_default(),
        }
    }

    /// Advance by one second, saturating at 00:00:00.
    #[must_use]
    pub const fn tick(self) -> Self {
        if self.seconds > 0 {
            return Self {
                seconds: self.seconds - 1,
                ..self
            };
        }
        if self.minutes > 0 {
            return Self {
                minutes: self.minutes - 1,
                seconds: 59,
                ..self
            };
        }
        if self.hours > 0 {
            return Self {
                hours: self.hours - 1,
                minutes: 59,
                seconds: 59,
            };
        }
        self
    }

    /// Whether the countdown has reached zero.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Remaining time in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_borrows_from_minutes_and_hours() {
        assert_eq!(Countdown::new(0, 1, 0).tick(), Countdown::new(0, 0, 59));
        assert_eq!(Countdown::new(1, 0, 0).tick(), Countdown::new(0, 59, 59));
        assert_eq!(Countdown::DEALS_START.tick().to_string(), "12:45:29");
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let zero = Countdown::new(0, 0, 0);
        assert!(zero.is_finished());
        assert_eq!(zero.tick(), zero);
    }

    #[test]
    fn test_new_normalizes_overflow() {
        assert_eq!(Countdown::new(0, 61, 75), Countdown::new(1, 2, 15));
        assert_eq!(Countdown::DEALS_START.total_seconds(), 45_930);
    }
}
