//! Multiplexed 7-segment output.
//!
//! The board has two 4-digit panels, one per player, sharing the segment
//! lines. Only one digit position is lit at a time; cycling through the four
//! positions fast enough makes the whole `MM.SS` value appear steady. The
//! decimal point on the second digit separates minutes from seconds.

use crate::clock::{Elapsed, PlayerClock};
use crate::game::Player;

/// Digit positions per panel.
pub const DIGIT_POSITIONS: u8 = 4;

/// Position carrying the minutes/seconds separator.
const SEPARATOR_POSITION: u8 = 1;

/// Segment patterns for 0-9, bit 0 = segment a ... bit 6 = segment g,
/// bit 7 = decimal point. Active low (common-anode digits).
const DIGIT_PATTERNS: [u8; 10] = [0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90];

/// Decimal point bit inside a pattern.
const DECIMAL_POINT: u8 = 0x80;

/// Segment pattern for `digit`, all segments off for anything above 9.
pub const fn digit_pattern(digit: u8) -> u8 {
    if digit < 10 {
        DIGIT_PATTERNS[digit as usize]
    } else {
        0xFF
    }
}

/// `pattern` with its decimal point lit.
pub const fn with_decimal_point(pattern: u8) -> u8 {
    pattern & !DECIMAL_POINT
}

/// Which panels a frame is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Panels {
    One(Player),
    Both,
}

impl Panels {
    /// Whether `player`'s panel is part of the selection.
    pub fn includes(self, player: Player) -> bool {
        match self {
            Panels::One(p) => p == player,
            Panels::Both => true,
        }
    }
}

/// A full 4-digit value destined for one or both panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub panels: Panels,
    pub digits: [u8; 4],
}

impl Frame {
    /// `MM.SS` from two-digit minutes and seconds.
    pub fn clock(panels: Panels, minutes: u8, seconds: u8) -> Self {
        Self {
            panels,
            digits: [minutes / 10 % 10, minutes % 10, seconds / 10, seconds % 10],
        }
    }

    pub fn remaining(panels: Panels, clock: &PlayerClock) -> Self {
        Self::clock(panels, clock.minutes(), clock.seconds())
    }

    pub fn elapsed(panels: Panels, elapsed: &Elapsed) -> Self {
        Self::clock(panels, elapsed.minutes, elapsed.seconds)
    }

    /// The digit lit at `position`.
    pub fn slot(&self, position: u8) -> Slot {
        let position = position % DIGIT_POSITIONS;
        Slot {
            panels: self.panels,
            position,
            digit: self.digits[position as usize],
            decimal_point: position == SEPARATOR_POSITION,
        }
    }

    /// Renders the frame as `MM:SS` text, mostly for logs and tests.
    pub fn text(&self) -> [u8; 5] {
        let d = self.digits;
        [b'0' + d[0], b'0' + d[1], b':', b'0' + d[2], b'0' + d[3]]
    }
}

/// One lit digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    pub panels: Panels,
    pub position: u8,
    pub digit: u8,
    pub decimal_point: bool,
}

impl Slot {
    /// Segment pattern for this slot, decimal point included.
    pub const fn pattern(&self) -> u8 {
        let pattern = digit_pattern(self.digit);
        if self.decimal_point {
            with_decimal_point(pattern)
        } else {
            pattern
        }
    }
}

/// Something that can light digit positions.
pub trait SegmentSink {
    /// Lights `slot` and turns every other position off.
    fn show(&mut self, slot: Slot);

    /// Turns every position on both panels off.
    fn blank(&mut self);
}

/// Digit cursor that walks the four positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Multiplexer {
    position: u8,
}

impl Multiplexer {
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Back to the first digit.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Shows the current position of `frame` and advances the cursor.
    pub fn show_next(&mut self, frame: &Frame, sink: &mut impl SegmentSink) {
        sink.show(frame.slot(self.position));
        self.position = (self.position + 1) % DIGIT_POSITIONS;
    }
}
