//! Firmware for a two-player chess clock.
//!
//! # Overview
//!
//! This firmware drives a dedicated chess clock board featuring:
//! - Two 4-digit 7-segment panels, one per player, multiplexed on shared segment lines
//! - One button per player to hand the move over, plus a result button
//! - A two-position selector for the time control (5 or 15 minutes)
//! - A buzzer for the end-of-game alarm
//! - Elapsed time per player kept in data EEPROM across power loss
//! - A serial report of the elapsed times
//!
//! # Hardware
//!
//! - **MCU**: STM32L053R8 (Cortex-M0+, 2 KB data EEPROM)
//! - **Display**: 2x common-anode 4-digit LED panels
//! - **RTC**: 32.768 kHz crystal
//!
//! # Tasks
//!
//! All game state sits in one [`GameContext`] behind a blocking
//! critical-section mutex. Every task touches it only inside `lock`, so a
//! transition can never interleave with a tick or a refresh.
//!
//! - **tick_task**: 2 Hz game tick (countdown, pauses, alarm timing)
//! - **refresh_task**: digit multiplexing
//! - **alarm_task**: tone synthesis while the alarm is active
//! - **input_task**: button edges into the event channel
//! - **main loop**: applies events, samples the selector, draws the result display
//!
//! # Module Organization
//!
//! - [`hardware`] - Pin mappings and peripheral initialization
//! - [`segments`] - 7-segment panel GPIO driver
//! - [`eeprom`] - Data EEPROM `embedded-storage` driver
//! - [`input`] - Button task and event channel

#![no_std]
#![no_main]

mod eeprom;
mod hardware;
mod input;
mod segments;

use core::cell::RefCell;

use chess_clock::alarm::{TONE_HZ, Tone};
use chess_clock::persist::ElapsedStore;
use chess_clock::{GameConfig, GameContext, SelectorLevel};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_stm32::{
    Config,
    gpio::Output,
    rcc::{LsConfig, LseConfig},
    time::Hertz,
};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use eeprom::DataEeprom;
use hardware::Peripherals;
use input::{EVENTS, input_task};
use segments::SegmentDisplay;

/// Game tick period. Two ticks make one game second.
const TICK_MS: u64 = 500;

/// Time each digit stays lit while multiplexing (4 digits, 125 Hz frame rate).
const REFRESH_US: u64 = 2_000;

/// Main loop polling period for the selector and the result display.
const POLL_MS: u64 = 4;

/// Offset of the elapsed-time record in the data EEPROM.
const RECORD_OFFSET: u32 = 0;

type SharedGame = Mutex<CriticalSectionRawMutex, RefCell<GameContext<DataEeprom>>>;
type SharedDisplay = Mutex<CriticalSectionRawMutex, RefCell<SegmentDisplay>>;

static GAME: StaticCell<SharedGame> = StaticCell::new();
static DISPLAY: StaticCell<SharedDisplay> = StaticCell::new();

/// Creates the clock configuration.
///
/// # Clock Settings
///
/// - **HSI**: 16 MHz, used directly as system clock (no PLL)
/// - **LSE**: 32.768 kHz external crystal for RTC
///
/// The multiplex refresh and the tone need a few kHz of timer resolution,
/// which rules out the slow MSI ranges.
fn create_clock_config() -> embassy_stm32::rcc::Config {
    let mut rcc = embassy_stm32::rcc::Config::default();
    rcc.hsi = true;
    rcc.sys = embassy_stm32::rcc::Sysclk::HSI;
    rcc.ls = LsConfig {
        rtc: embassy_stm32::rcc::RtcClockSource::LSE,
        lsi: false,
        lse: Some(LseConfig {
            frequency: Hertz::hz(32768),
            mode: embassy_stm32::rcc::LseMode::Oscillator(embassy_stm32::rcc::LseDrive::Low),
        }),
    };
    rcc
}

/// 2 Hz tick: counts the active clock down and runs the pauses and alarm.
#[embassy_executor::task]
async fn tick_task(game: &'static SharedGame) {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        ticker.next().await;
        if let Err(e) = game.lock(|g| g.borrow_mut().on_tick()) {
            defmt::warn!("Elapsed commit failed: {}", e);
        }
    }
}

/// Lights the next digit of whatever the game currently shows.
#[embassy_executor::task]
async fn refresh_task(game: &'static SharedGame, display: &'static SharedDisplay) {
    let mut ticker = Ticker::every(Duration::from_micros(REFRESH_US));
    loop {
        ticker.next().await;
        game.lock(|g| display.lock(|d| g.borrow_mut().on_refresh(&mut *d.borrow_mut())));
    }
}

/// Square wave on the buzzer while the alarm is active.
#[embassy_executor::task]
async fn alarm_task(game: &'static SharedGame, mut tone: Tone<Output<'static>>) {
    let mut ticker = Ticker::every(Duration::from_hz(u64::from(TONE_HZ) * 2));
    loop {
        ticker.next().await;
        let active = game.lock(|g| g.borrow().alarm_active());
        let Ok(()) = tone.drive(active);
    }
}

/// Main entry point for chess clock firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks (HSI16)
/// 2. Initialize STM32 peripherals
/// 3. Build the game on top of the data EEPROM record
/// 4. Spawn tick, refresh, alarm and input tasks
/// 5. Enter main loop
///
/// # Main Loop
///
/// Waits for either a button event or the poll period:
/// - Button event: applied to the game (may write the serial report)
/// - Poll: selector sampled (only effective while idle) and one digit of the
///   result display drawn (only while showing the result)
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_clock_config();

    let p = embassy_stm32::init(config);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Chess clock firmware starting...");

    let peripherals = Peripherals::new(p).unwrap();
    let Peripherals {
        display,
        buzzer,
        selector,
        buttons,
        mut telemetry,
        eeprom,
    } = peripherals;

    #[cfg(feature = "debug-mode")]
    defmt::info!("Building game context...");

    let game_config = GameConfig::DEFAULT;
    let mut context = GameContext::new(game_config, ElapsedStore::new(eeprom, RECORD_OFFSET));
    context.sample_selector(SelectorLevel::from(selector.is_high()));
    defmt::info!("Time control {}", context.time_control());

    let game: &'static SharedGame = GAME.init(Mutex::new(RefCell::new(context)));
    let display: &'static SharedDisplay = DISPLAY.init(Mutex::new(RefCell::new(display)));
    let Ok(tone) = Tone::new(buzzer);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Spawning tasks...");

    spawner.spawn(tick_task(game)).unwrap();
    spawner.spawn(refresh_task(game, display)).unwrap();
    spawner.spawn(alarm_task(game, tone)).unwrap();
    spawner.spawn(input_task(buttons)).unwrap();

    #[cfg(feature = "debug-mode")]
    defmt::info!("Entering main loop...");

    let mut poll = Ticker::every(Duration::from_millis(POLL_MS));
    loop {
        match select(EVENTS.receive(), poll.next()).await {
            Either::First(event) => {
                #[cfg(feature = "debug-mode")]
                defmt::info!("Event {}", event);

                if let Err(e) = game.lock(|g| g.borrow_mut().on_event(event, &mut telemetry)) {
                    defmt::warn!("Event {} failed: {}", event, e);
                }
            }
            Either::Second(()) => {
                let level = SelectorLevel::from(selector.is_high());
                game.lock(|g| {
                    let mut g = g.borrow_mut();
                    g.sample_selector(level);
                    display.lock(|d| g.poll_static(&mut *d.borrow_mut()));
                });
            }
        }
    }
}
