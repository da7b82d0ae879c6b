//! Square-wave tone on a single output pin.

use embedded_hal::digital::v2::OutputPin;

/// Tone frequency of the end-of-game alarm.
pub const TONE_HZ: u32 = 1_000;

/// Drives a buzzer pin.
///
/// Call [`Tone::drive`] at twice [`TONE_HZ`]; each active call flips the pin,
/// each inactive call parks it low.
pub struct Tone<P> {
    pin: P,
    high: bool,
}

impl<P: OutputPin> Tone<P> {
    /// Wraps `pin` and forces it low.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, high: false })
    }

    /// One half-period of the tone.
    pub fn drive(&mut self, active: bool) -> Result<(), P::Error> {
        if active {
            if self.high {
                self.pin.set_low()?;
            } else {
                self.pin.set_high()?;
            }
            self.high = !self.high;
        } else if self.high {
            self.pin.set_low()?;
            self.high = false;
        }
        Ok(())
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn release(self) -> P {
        self.pin
    }
}
