//! GPIO driver for the two multiplexed 7-segment panels.
//!
//! Both panels share the eight segment lines. Each panel has four digit
//! select lines; raising one lights that digit with whatever pattern is on
//! the segment lines.

use chess_clock::display::{DIGIT_POSITIONS, SegmentSink, Slot};
use chess_clock::Player;
use embassy_stm32::gpio::Output;

/// Segment and digit-select lines of the display.
pub struct SegmentDisplay {
    /// Segments a..g then dp, active low
    segments: [Output<'static>; 8],
    /// Player A digit selects, left to right
    panel_a: [Output<'static>; 4],
    /// Player B digit selects, left to right
    panel_b: [Output<'static>; 4],
}

impl SegmentDisplay {
    /// Creates a new SegmentDisplay.
    ///
    /// # Arguments
    ///
    /// * `segments` - Segment lines a, b, c, d, e, f, g, dp
    /// * `panel_a` - Player A digit selects
    /// * `panel_b` - Player B digit selects
    pub fn new(
        segments: [Output<'static>; 8],
        panel_a: [Output<'static>; 4],
        panel_b: [Output<'static>; 4],
    ) -> Self {
        Self {
            segments,
            panel_a,
            panel_b,
        }
    }

    /// Puts `pattern` on the segment lines, bit 0 on segment a.
    fn drive_segments(&mut self, pattern: u8) {
        for (bit, line) in self.segments.iter_mut().enumerate() {
            if pattern & (1 << bit) != 0 {
                line.set_high();
            } else {
                line.set_low();
            }
        }
    }

    fn panel(&mut self, player: Player) -> &mut [Output<'static>; 4] {
        match player {
            Player::A => &mut self.panel_a,
            Player::B => &mut self.panel_b,
        }
    }
}

impl SegmentSink for SegmentDisplay {
    /// Deselects every digit before changing segments to avoid ghosting on
    /// the previous position.
    fn show(&mut self, slot: Slot) {
        self.blank();
        self.drive_segments(slot.pattern());

        let position = usize::from(slot.position % DIGIT_POSITIONS);
        for player in [Player::A, Player::B] {
            if slot.panels.includes(player) {
                if let Some(select) = self.panel(player).get_mut(position) {
                    select.set_high();
                }
            }
        }
    }

    fn blank(&mut self) {
        for select in self.panel_a.iter_mut().chain(self.panel_b.iter_mut()) {
            select.set_low();
        }
    }
}

