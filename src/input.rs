//! Button input for the chess clock.
//!
//! The three buttons are rising-edge EXTI inputs. A single task waits on all
//! three and forwards each press as a [`chess_clock::Event`] through a static
//! channel to the main loop, which applies it to the game under the game
//! mutex.
//!
//! # Debounce
//!
//! Debouncing is done by the game itself: after a switch or a result request
//! the game sits in a blank pause for two seconds and drops every event that
//! arrives meanwhile. The channel is shallow and full sends are dropped, so a
//! bouncing contact cannot queue up a burst of presses either.

use chess_clock::Event;
use embassy_futures::select::{Either3, select3};
use embassy_stm32::exti::ExtiInput;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

/// Depth of the event channel.
const EVENT_DEPTH: usize = 2;

/// Static channel carrying button presses to the main loop.
pub static EVENTS: Channel<CriticalSectionRawMutex, Event, EVENT_DEPTH> = Channel::new();

/// The three edge-triggered buttons.
pub struct Buttons {
    /// Pressed by player A after moving
    pub switch_to_b: ExtiInput<'static>,
    /// Pressed by player B after moving
    pub switch_to_a: ExtiInput<'static>,
    /// Result request
    pub show_result: ExtiInput<'static>,
}

impl Buttons {
    /// Waits for the next rising edge on any button.
    pub async fn next_event(&mut self) -> Event {
        match select3(
            self.switch_to_b.wait_for_rising_edge(),
            self.switch_to_a.wait_for_rising_edge(),
            self.show_result.wait_for_rising_edge(),
        )
        .await
        {
            Either3::First(()) => Event::SwitchToB,
            Either3::Second(()) => Event::SwitchToA,
            Either3::Third(()) => Event::ShowResult,
        }
    }
}

/// Async task forwarding button presses to [`EVENTS`].
///
/// Runs continuously in the background.
///
/// # Arguments
///
/// * `buttons` - Buttons instance (takes ownership)
#[embassy_executor::task]
pub async fn input_task(mut buttons: Buttons) {
    loop {
        let event = buttons.next_event().await;
        if EVENTS.try_send(event).is_err() {
            defmt::debug!("Dropping {}: event queue full", event);
        }
    }
}
