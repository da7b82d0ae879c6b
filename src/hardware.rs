//! Hardware abstraction and peripheral initialization.
//!
//! This module defines the pin mappings and peripheral initialization
//! for the chess clock board (NUCLEO-L053R8 carrier).
//!
//! # Pin Assignments
//!
//! ## Display (two common-anode 4-digit panels, shared segment lines)
//! - **PC0..PC7**: segments a, b, c, d, e, f, g, dp (active low)
//! - **PB8..PB11**: player A digit selects, left to right (active high)
//! - **PB12..PB15**: player B digit selects, left to right (active high)
//!
//! ## Buttons (rising edge, pull-down)
//! - **PA0** (EXTI0): player A done, start B's clock
//! - **PA1** (EXTI1): player B done, start A's clock
//! - **PA4** (EXTI4): show/report result
//!
//! ## Misc
//! - **PA6**: time-control selector (high = short game, pulled down so an open contact reads low)
//! - **PA8**: buzzer drive
//! - **PA2**: USART2 TX, 9600 8N1 to the ST-LINK virtual COM port
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, UartTx};

use crate::eeprom::DataEeprom;
use crate::input::Buttons;
use crate::segments::SegmentDisplay;

/// Telemetry baud rate.
pub const TELEMETRY_BAUD: u32 = 9600;

/// Top-level peripheral container for the chess clock.
///
/// Owns all hardware controllers and provides initialization
/// from STM32 peripheral singleton.
pub struct Peripherals {
    /// Multiplexed 7-segment panels
    pub display: SegmentDisplay,
    /// Buzzer output for the alarm tone
    pub buzzer: Output<'static>,
    /// Two-position time-control switch
    pub selector: Input<'static>,
    /// Player and result buttons
    pub buttons: Buttons,
    /// Serial line for the result report
    pub telemetry: UartTx<'static, Blocking>,
    /// On-chip data EEPROM holding the elapsed-time record
    pub eeprom: DataEeprom,
}

impl Peripherals {
    /// Initializes all peripherals from STM32 peripheral singleton.
    ///
    /// Every digit select starts low so nothing is lit until the first
    /// multiplex refresh. The buzzer starts low.
    ///
    /// # Errors
    ///
    /// Fails only if the UART cannot be configured for [`TELEMETRY_BAUD`].
    pub fn new(p: embassy_stm32::Peripherals) -> Result<Self, usart::ConfigError> {
        let mut uart_config = usart::Config::default();
        uart_config.baudrate = TELEMETRY_BAUD;

        Ok(Self {
            display: SegmentDisplay::new(
                [
                    Output::new(p.PC0, Level::High, Speed::Low),
                    Output::new(p.PC1, Level::High, Speed::Low),
                    Output::new(p.PC2, Level::High, Speed::Low),
                    Output::new(p.PC3, Level::High, Speed::Low),
                    Output::new(p.PC4, Level::High, Speed::Low),
                    Output::new(p.PC5, Level::High, Speed::Low),
                    Output::new(p.PC6, Level::High, Speed::Low),
                    Output::new(p.PC7, Level::High, Speed::Low),
                ],
                [
                    Output::new(p.PB8, Level::Low, Speed::Low),
                    Output::new(p.PB9, Level::Low, Speed::Low),
                    Output::new(p.PB10, Level::Low, Speed::Low),
                    Output::new(p.PB11, Level::Low, Speed::Low),
                ],
                [
                    Output::new(p.PB12, Level::Low, Speed::Low),
                    Output::new(p.PB13, Level::Low, Speed::Low),
                    Output::new(p.PB14, Level::Low, Speed::Low),
                    Output::new(p.PB15, Level::Low, Speed::Low),
                ],
            ),
            buzzer: Output::new(p.PA8, Level::Low, Speed::Low),
            selector: Input::new(p.PA6, Pull::Down),
            buttons: Buttons {
                switch_to_b: ExtiInput::new(p.PA0, p.EXTI0, Pull::Down),
                switch_to_a: ExtiInput::new(p.PA1, p.EXTI1, Pull::Down),
                show_result: ExtiInput::new(p.PA4, p.EXTI4, Pull::Down),
            },
            telemetry: UartTx::new_blocking(p.USART2, p.PA2, uart_config)?,
            eeprom: DataEeprom::new(),
        })
    }
}
