//! Compile-time game tunables.
//!
//! The board has no configuration storage beyond the elapsed-time record, so
//! every tunable is a constant. [`GameConfig::DEFAULT`] is what the firmware
//! runs with; tests build their own values.

use crate::time_control::TimeControl;

/// Seconds in a minute, used by every borrow and elapsed computation.
pub const SECONDS_IN_MINUTE: u8 = 60;

/// Remaining seconds (with zero minutes) at which the display starts blinking.
pub const BLINK_SECONDS: u8 = 15;

/// Length of the end-of-game alarm in whole seconds.
pub const ALARM_SECONDS: u8 = 4;

/// Ticks (half seconds) the display stays blank after a handoff.
///
/// Button events arriving during the pause are discarded, which is what
/// debounces the mechanical switches.
pub const SETTLE_TICKS: u8 = 4;

/// Game tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Control applied when the selector reads high
    pub selector_high: TimeControl,
    /// Control applied when the selector reads low or floats
    pub selector_low: TimeControl,
    /// See [`BLINK_SECONDS`]
    pub blink_seconds: u8,
    /// See [`ALARM_SECONDS`]
    pub alarm_seconds: u8,
    /// Blank pause after a player switch, in ticks
    pub switch_settle_ticks: u8,
    /// Blank pause before the result is shown, in ticks
    pub result_settle_ticks: u8,
}

impl GameConfig {
    /// Configuration the firmware ships with.
    ///
    /// With `debug-mode` the high selector position runs the one-minute bench
    /// control so a full game fits in a debugging session.
    pub const DEFAULT: Self = Self {
        #[cfg(feature = "debug-mode")]
        selector_high: TimeControl::Bullet,
        #[cfg(not(feature = "debug-mode"))]
        selector_high: TimeControl::Blitz,
        selector_low: TimeControl::Rapid,
        blink_seconds: BLINK_SECONDS,
        alarm_seconds: ALARM_SECONDS,
        switch_settle_ticks: SETTLE_TICKS,
        result_settle_ticks: SETTLE_TICKS,
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
