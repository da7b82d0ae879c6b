//! Per-player countdown.
//!
//! In memory a clock holds time *left*; what gets persisted is time *used*
//! ([`Elapsed`]), computed against the game budget at every commit.

use crate::config::SECONDS_IN_MINUTE;
use crate::time_control::TimeControl;

/// Result of one second of countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Countdown {
    /// A second was taken off the clock
    Counted,
    /// A second was taken off and the clock just reached the low-time threshold
    LowTime,
    /// The clock was already at `00:00`; nothing left to take
    Expired,
}

/// Remaining time for one player.
///
/// `seconds` is always below 60. The clock never goes below `00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerClock {
    minutes: u8,
    seconds: u8,
}

impl PlayerClock {
    /// Clock at `00:00`.
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    /// Builds a clock, returning `None` if `seconds` is out of range.
    pub const fn new(minutes: u8, seconds: u8) -> Option<Self> {
        if seconds < SECONDS_IN_MINUTE {
            Some(Self { minutes, seconds })
        } else {
            None
        }
    }

    /// Clock at the start of a game: one second already shaved off the budget,
    /// so a five-minute control shows `04:59`.
    pub const fn fresh(control: TimeControl) -> Self {
        Self {
            minutes: control.minutes().saturating_sub(1),
            seconds: SECONDS_IN_MINUTE - 1,
        }
    }

    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Remaining time in seconds.
    pub const fn total_seconds(&self) -> u16 {
        self.minutes as u16 * SECONDS_IN_MINUTE as u16 + self.seconds as u16
    }

    /// Takes one second off the clock, borrowing from the minutes when the
    /// seconds are exhausted.
    ///
    /// Reports [`Countdown::LowTime`] on the second that lands exactly on
    /// `00:blink_seconds`, so the warning fires once per game.
    pub fn count_down(&mut self, blink_seconds: u8) -> Countdown {
        if self.seconds == 0 && self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = SECONDS_IN_MINUTE - 1;
            Countdown::Counted
        } else if self.seconds > 0 {
            self.seconds -= 1;
            if self.minutes == 0 && self.seconds == blink_seconds {
                Countdown::LowTime
            } else {
                Countdown::Counted
            }
        } else {
            *self = Self::ZERO;
            Countdown::Expired
        }
    }

    /// Time used so far against `control`'s budget.
    pub fn elapsed(&self, control: TimeControl) -> Elapsed {
        Elapsed::from_seconds(control.total_seconds().saturating_sub(self.total_seconds()))
    }
}

/// Time a player has used, as stored in the persistence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Elapsed {
    pub minutes: u8,
    pub seconds: u8,
}

impl Elapsed {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    /// Largest minute count the two-digit display can show.
    pub const MAX_MINUTES: u8 = 99;

    /// The whole budget of `control`, committed when a clock runs out.
    pub const fn full(control: TimeControl) -> Self {
        Self {
            minutes: control.minutes(),
            seconds: 0,
        }
    }

    /// Splits a second count into minutes and seconds, saturating at the
    /// display limit.
    pub fn from_seconds(total: u16) -> Self {
        let minutes = total / SECONDS_IN_MINUTE as u16;
        if minutes > Self::MAX_MINUTES as u16 {
            return Self {
                minutes: Self::MAX_MINUTES,
                seconds: SECONDS_IN_MINUTE - 1,
            };
        }
        Self {
            minutes: minutes as u8,
            seconds: (total % SECONDS_IN_MINUTE as u16) as u8,
        }
    }

    /// Whether a record read back from storage can be a real elapsed time.
    pub const fn is_plausible(&self) -> bool {
        self.seconds < SECONDS_IN_MINUTE && self.minutes <= Self::MAX_MINUTES
    }
}
