//! On-chip data EEPROM driver.
//!
//! The STM32L0 data EEPROM is memory mapped for reads and byte-programmable
//! once the PECR register is unlocked. A byte write erases and programs the
//! cell in one operation, so no page erase is needed and each write is
//! durable when the busy flag drops.
//!
//! # Unlock Sequence
//!
//! Writing `PEKEY1` then `PEKEY2` to FLASH_PEKEYR clears PECR.PELOCK. Setting
//! PELOCK again relocks until the next unlock.

use embassy_stm32::pac;
use embedded_storage::{ReadStorage, Storage};

/// Start of the data EEPROM in the address space.
const DATA_EEPROM_BASE: u32 = 0x0808_0000;

/// Data EEPROM size on STM32L053x8.
const DATA_EEPROM_SIZE: u32 = 2 * 1024;

/// First PECR unlock key
const PEKEY1: u32 = 0x89AB_CDEF;

/// Second PECR unlock key
const PEKEY2: u32 = 0x0203_0405;

/// Data EEPROM access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum EepromError {
    /// Access runs past the end of the data EEPROM
    OutOfBounds,
    /// PECR stayed locked after the unlock sequence
    Locked,
    /// The controller flagged a programming error
    Program,
}

/// Byte-addressable view of the data EEPROM, offsets from its base.
pub struct DataEeprom {
    _private: (),
}

impl DataEeprom {
    /// Creates the driver. The memory interface clock is on after reset.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn check_range(offset: u32, len: usize) -> Result<u32, EepromError> {
        let len = u32::try_from(len).map_err(|_| EepromError::OutOfBounds)?;
        match offset.checked_add(len) {
            Some(end) if end <= DATA_EEPROM_SIZE => Ok(DATA_EEPROM_BASE + offset),
            _ => Err(EepromError::OutOfBounds),
        }
    }

    fn unlock(&mut self) -> Result<(), EepromError> {
        let flash = pac::FLASH;
        if flash.pecr().read().pelock() {
            flash.pekeyr().write_value(PEKEY1);
            flash.pekeyr().write_value(PEKEY2);
        }
        if flash.pecr().read().pelock() {
            Err(EepromError::Locked)
        } else {
            Ok(())
        }
    }

    fn lock(&mut self) {
        pac::FLASH.pecr().modify(|w| w.set_pelock(true));
    }

    fn wait_ready(&mut self) -> Result<(), EepromError> {
        let flash = pac::FLASH;
        while flash.sr().read().bsy() {}
        let sr = flash.sr().read();
        if sr.wrperr() || sr.pgaerr() || sr.sizerr() {
            // Error flags are cleared by writing 1
            flash.sr().write(|w| {
                w.set_wrperr(true);
                w.set_pgaerr(true);
                w.set_sizerr(true);
            });
            return Err(EepromError::Program);
        }
        Ok(())
    }

    fn program(&mut self, address: u32, bytes: &[u8]) -> Result<(), EepromError> {
        for (address, &byte) in (address..).zip(bytes) {
            let cell = address as *mut u8;
            // SAFETY: `address` lies inside the memory-mapped data EEPROM
            // (checked by the caller), which is always readable.
            let current = unsafe { core::ptr::read_volatile(cell) };
            if current == byte {
                continue;
            }
            // SAFETY: same address, and PECR is unlocked, so a byte store
            // starts programming the cell.
            unsafe { core::ptr::write_volatile(cell, byte) };
            self.wait_ready()?;
        }
        Ok(())
    }
}

impl ReadStorage for DataEeprom {
    type Error = EepromError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = Self::check_range(offset, bytes.len())?;
        for (address, byte) in (start..).zip(bytes.iter_mut()) {
            // SAFETY: the range check keeps every address inside the
            // memory-mapped data EEPROM, which is always readable.
            *byte = unsafe { core::ptr::read_volatile(address as *const u8) };
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        DATA_EEPROM_SIZE as usize
    }
}

impl Storage for DataEeprom {
    /// Programs `bytes` one cell at a time, skipping cells that already hold
    /// the value. Blocks until the last byte is durable.
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = Self::check_range(offset, bytes.len())?;
        self.unlock()?;
        let result = self.program(start, bytes);
        self.lock();
        result
    }
}
