//! Selectable game budgets and the two-position selector that picks one.

use crate::config::GameConfig;

/// Total minutes each player gets for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeControl {
    /// One minute, for bench testing
    Bullet,
    /// Five minutes
    Blitz,
    /// Fifteen minutes
    Rapid,
}

impl TimeControl {
    /// Budget in whole minutes.
    pub const fn minutes(self) -> u8 {
        match self {
            TimeControl::Bullet => 1,
            TimeControl::Blitz => 5,
            TimeControl::Rapid => 15,
        }
    }

    /// Budget in seconds.
    pub const fn total_seconds(self) -> u16 {
        self.minutes() as u16 * 60
    }
}

/// Level read from the time-control selector input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectorLevel {
    High,
    Low,
    /// Neither level could be established (open contact, noise)
    Undefined,
}

impl From<bool> for SelectorLevel {
    fn from(high: bool) -> Self {
        if high {
            SelectorLevel::High
        } else {
            SelectorLevel::Low
        }
    }
}

impl GameConfig {
    /// Maps a selector reading to a time control.
    ///
    /// Anything other than a clean high level selects `selector_low`.
    pub fn control_for(&self, level: SelectorLevel) -> TimeControl {
        match level {
            SelectorLevel::High => self.selector_high,
            SelectorLevel::Low | SelectorLevel::Undefined => self.selector_low,
        }
    }
}
