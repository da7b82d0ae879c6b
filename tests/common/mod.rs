//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use core::convert::Infallible;

use chess_clock::display::{SegmentSink, Slot};
use chess_clock::persist::ElapsedStore;
use chess_clock::{GameConfig, GameContext, Player, TimeControl};
use embedded_storage::{ReadStorage, Storage};

/// Byte-addressable RAM standing in for the data EEPROM.
#[derive(Debug, Clone)]
pub struct MemStorage {
    pub bytes: Vec<u8>,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MemStorage {
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
            writes: 0,
            fail_writes: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemError {
    OutOfBounds,
    WriteRejected,
}

impl ReadStorage for MemStorage {
    type Error = MemError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let src = self
            .bytes
            .get(start..start + bytes.len())
            .ok_or(MemError::OutOfBounds)?;
        bytes.copy_from_slice(src);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for MemStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemError::WriteRejected);
        }
        let start = offset as usize;
        let dst = self
            .bytes
            .get_mut(start..start + bytes.len())
            .ok_or(MemError::OutOfBounds)?;
        dst.copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}

/// Collects everything written to the serial port.
#[derive(Debug, Default)]
pub struct Serial {
    pub out: Vec<u8>,
}

impl Serial {
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.out).unwrap()
    }
}

impl embedded_io::ErrorType for Serial {
    type Error = Infallible;
}

impl embedded_io::Write for Serial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.out.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// What a [`SegmentSink`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lit {
    Slot(Slot),
    Blank,
}

/// Records every call made on the display.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<Lit>,
}

impl RecordingSink {
    pub fn blanks(&self) -> usize {
        self.calls.iter().filter(|c| **c == Lit::Blank).count()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Lit::Slot(s) => Some(*s),
                Lit::Blank => None,
            })
            .collect()
    }
}

impl SegmentSink for RecordingSink {
    fn show(&mut self, slot: Slot) {
        self.calls.push(Lit::Slot(slot));
    }

    fn blank(&mut self) {
        self.calls.push(Lit::Blank);
    }
}

/// Output pin that records its level history.
#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl embedded_hal::digital::v2::OutputPin for RecordingPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

/// Config with the shipped tunables and the given selector mapping.
pub fn config(control: TimeControl) -> GameConfig {
    GameConfig {
        selector_high: control,
        selector_low: control,
        ..GameConfig::DEFAULT
    }
}

/// Idle game on a blank store with `control` selected.
pub fn game(control: TimeControl) -> GameContext<MemStorage> {
    let mut game = GameContext::new(config(control), ElapsedStore::new(MemStorage::new(16), 0));
    game.sample_selector(true.into());
    game
}

/// Ticks until the pending handoff pause is over.
pub fn settle(game: &mut GameContext<MemStorage>) {
    for _ in 0..game.config().switch_settle_ticks {
        game.on_tick().unwrap();
    }
}

/// Starts `player`'s clock from idle and waits out the pause.
pub fn start(game: &mut GameContext<MemStorage>, player: Player) {
    let event = match player {
        Player::A => chess_clock::Event::SwitchToA,
        Player::B => chess_clock::Event::SwitchToB,
    };
    game.on_event(event, &mut Serial::default()).unwrap();
    settle(game);
}

/// Runs `n` whole game seconds (two ticks each).
pub fn run_seconds(game: &mut GameContext<MemStorage>, n: u32) {
    for _ in 0..n * 2 {
        game.on_tick().unwrap();
    }
}
