//! Elapsed-time record in byte-addressable non-volatile storage.
//!
//! The record is four independent bytes starting at a base offset:
//!
//! | Offset | Field             |
//! |--------|-------------------|
//! | +0     | player A minutes  |
//! | +1     | player A seconds  |
//! | +2     | player B minutes  |
//! | +3     | player B seconds  |
//!
//! Values are time *used*, so a record left behind by a power cut mid-game
//! reports how long each player actually thought.

use embedded_storage::Storage;

use crate::clock::Elapsed;
use crate::game::Player;

/// One byte of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    AMinutes,
    ASeconds,
    BMinutes,
    BSeconds,
}

impl Field {
    /// Offset from the record base.
    pub const fn offset(self) -> u32 {
        match self {
            Field::AMinutes => 0,
            Field::ASeconds => 1,
            Field::BMinutes => 2,
            Field::BSeconds => 3,
        }
    }

    /// Minutes and seconds fields for `player`.
    pub const fn for_player(player: Player) -> (Field, Field) {
        match player {
            Player::A => (Field::AMinutes, Field::ASeconds),
            Player::B => (Field::BMinutes, Field::BSeconds),
        }
    }
}

/// Elapsed-time store on top of any [`Storage`].
///
/// Writes are synchronous; the store is expected to be durable when
/// `write` returns.
pub struct ElapsedStore<S> {
    storage: S,
    base: u32,
}

impl<S: Storage> ElapsedStore<S> {
    /// Wraps `storage`, placing the record at `base`.
    pub fn new(storage: S, base: u32) -> Self {
        Self { storage, base }
    }

    /// Reads one byte of the record.
    pub fn read(&mut self, field: Field) -> Result<u8, S::Error> {
        let mut byte = [0u8; 1];
        self.storage.read(self.base + field.offset(), &mut byte)?;
        Ok(byte[0])
    }

    /// Writes one byte of the record.
    pub fn write(&mut self, field: Field, value: u8) -> Result<(), S::Error> {
        self.storage.write(self.base + field.offset(), &[value])
    }

    /// Commits `elapsed` for `player`, minutes first.
    pub fn commit(&mut self, player: Player, elapsed: Elapsed) -> Result<(), S::Error> {
        let (minutes, seconds) = Field::for_player(player);
        self.write(minutes, elapsed.minutes)?;
        self.write(seconds, elapsed.seconds)
    }

    /// Reads back the elapsed time for `player`.
    ///
    /// A record that cannot be a real elapsed time (erased flash, torn write
    /// from an older layout) reads as zero.
    pub fn load(&mut self, player: Player) -> Result<Elapsed, S::Error> {
        let (minutes, seconds) = Field::for_player(player);
        let elapsed = Elapsed {
            minutes: self.read(minutes)?,
            seconds: self.read(seconds)?,
        };
        if elapsed.is_plausible() {
            Ok(elapsed)
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Discarding implausible elapsed record {}", elapsed);
            Ok(Elapsed::ZERO)
        }
    }

    /// Underlying storage, mainly for inspection in tests.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_storage::ReadStorage;

    /// 16 bytes of RAM pretending to be EEPROM.
    struct Ram([u8; 16]);

    impl ReadStorage for Ram {
        type Error = ();

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), ()> {
            let start = offset as usize;
            let src = self.0.get(start..start + bytes.len()).ok_or(())?;
            bytes.copy_from_slice(src);
            Ok(())
        }

        fn capacity(&self) -> usize {
            self.0.len()
        }
    }

    impl Storage for Ram {
        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), ()> {
            let start = offset as usize;
            let dst = self.0.get_mut(start..start + bytes.len()).ok_or(())?;
            dst.copy_from_slice(bytes);
            Ok(())
        }
    }

    #[test]
    fn layout_at_base_offset() {
        let mut store = ElapsedStore::new(Ram([0; 16]), 8);
        store.commit(Player::A, Elapsed { minutes: 2, seconds: 30 }).unwrap();
        store.commit(Player::B, Elapsed { minutes: 1, seconds: 10 }).unwrap();
        assert_eq!(&store.storage().0[8..12], &[2, 30, 1, 10]);
        assert_eq!(store.load(Player::B).unwrap(), Elapsed { minutes: 1, seconds: 10 });
    }

    #[test]
    fn erased_record_reads_as_zero() {
        let mut store = ElapsedStore::new(Ram([0xFF; 16]), 0);
        assert_eq!(store.load(Player::A).unwrap(), Elapsed::ZERO);
    }

    #[test]
    fn out_of_range_write_is_reported() {
        let mut store = ElapsedStore::new(Ram([0; 16]), 14);
        assert_eq!(store.commit(Player::B, Elapsed::ZERO), Err(()));
    }
}
