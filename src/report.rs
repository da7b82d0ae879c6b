//! Serial report of elapsed time.
//!
//! Two lines, one per player:
//!
//! ```text
//! Time spent by player A: 02:30
//! Time spent by player B: 01:10
//! ```
//!
//! Lines end in `\n\r` for the terminal on the other end of the UART.

use core::fmt::Write as _;

use embedded_io::Write;
use heapless::String;

use crate::clock::Elapsed;
use crate::error::Error;
use crate::game::Player;

/// Longest line the report produces, with headroom.
const LINE_CAPACITY: usize = 40;

/// Formats one report line.
pub fn line(player: Player, elapsed: Elapsed) -> Option<String<LINE_CAPACITY>> {
    let mut line = String::new();
    write!(
        line,
        "Time spent by player {}: {:02}:{:02}\n\r",
        player.label(),
        elapsed.minutes,
        elapsed.seconds
    )
    .ok()?;
    Some(line)
}

/// Writes the two-line report to `out` and flushes it.
pub fn write_report<W: Write, S>(out: &mut W, a: Elapsed, b: Elapsed) -> Result<(), Error<S, W::Error>> {
    for (player, elapsed) in [(Player::A, a), (Player::B, b)] {
        let line = line(player, elapsed).ok_or(Error::LineOverflow)?;
        out.write_all(line.as_bytes()).map_err(Error::Telemetry)?;
    }
    out.flush().map_err(Error::Telemetry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_padded_minutes_and_seconds() {
        let line = line(Player::B, Elapsed { minutes: 1, seconds: 5 }).unwrap();
        assert_eq!(line.as_str(), "Time spent by player B: 01:05\n\r");
    }

    #[test]
    fn two_digit_values_are_not_padded() {
        let line = line(Player::A, Elapsed { minutes: 15, seconds: 0 }).unwrap();
        assert_eq!(line.as_str(), "Time spent by player A: 15:00\n\r");
    }
}
