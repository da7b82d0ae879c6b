//! Game clock state machine.
//!
//! [`GameContext`] owns everything that changes during a game: the lifecycle
//! state, both clocks, the selected time control, the blink and half-second
//! flags, the digit cursor and the elapsed-time store. The firmware keeps a
//! single instance behind one mutex and feeds it four kinds of input:
//!
//! - [`GameContext::on_tick`] from the 2 Hz tick
//! - [`GameContext::on_event`] for button presses
//! - [`GameContext::on_refresh`] from the fast multiplex timer
//! - [`GameContext::sample_selector`] and [`GameContext::poll_static`] from the main loop
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──switch──▶ Blanking ──ticks──▶ Running(P) ──other switch──▶ Blanking ──▶ Running(Q)
//!                                          │
//!                                          └──clock expired──▶ Finished ──alarm done──▶ Idle
//!
//! any state but Blanking ──show result──▶ ResultDisplay ──switch──▶ Blanking (fresh clock)
//! ```

use embedded_io::Write;
use embedded_storage::Storage;

use crate::clock::{Countdown, Elapsed, PlayerClock};
use crate::config::GameConfig;
use crate::display::{Frame, Multiplexer, Panels, SegmentSink};
use crate::error::Error;
use crate::persist::ElapsedStore;
use crate::report;
use crate::time_control::{SelectorLevel, TimeControl};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub const fn label(self) -> char {
        match self {
            Player::A => 'A',
            Player::B => 'B',
        }
    }

    const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

/// Discrete input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Player A finished a move: start B's clock
    SwitchToB,
    /// Player B finished a move: start A's clock
    SwitchToA,
    /// Show and report the stored elapsed times
    ShowResult,
}

impl Event {
    /// Player whose clock the event starts, if it is a switch.
    pub const fn switch_target(self) -> Option<Player> {
        match self {
            Event::SwitchToA => Some(Player::A),
            Event::SwitchToB => Some(Player::B),
            Event::ShowResult => None,
        }
    }
}

/// Elapsed times read back for the result display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResultView {
    pub a: Elapsed,
    pub b: Elapsed,
    /// Panel currently showing its player's result
    pub shown: Player,
    /// Ticks left before the result appears
    pub settle_ticks: u8,
}

impl ResultView {
    pub const fn elapsed(&self, player: Player) -> Elapsed {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// Waiting for the first move; the selector is live
    Idle,
    /// Blank pause after a switch; `next` starts running when it ends
    Blanking { next: Player, ticks_left: u8 },
    /// The player's clock is counting down
    Running(Player),
    /// Showing elapsed times read back from storage
    ResultDisplay(ResultView),
    /// `expired` ran out of time; the alarm sounds for `alarm_seconds`
    Finished { expired: Player, seconds: u8 },
}

/// The whole game, owned in one place.
pub struct GameContext<S> {
    config: GameConfig,
    state: GameState,
    control: TimeControl,
    clocks: [PlayerClock; 2],
    blink: bool,
    half_second: bool,
    mux: Multiplexer,
    store: ElapsedStore<S>,
}

impl<S: Storage> GameContext<S> {
    /// Fresh context in `Idle`, clocks set to `config.selector_low` until the
    /// selector is first sampled.
    pub fn new(config: GameConfig, store: ElapsedStore<S>) -> Self {
        let control = config.selector_low;
        Self {
            config,
            state: GameState::Idle,
            control,
            clocks: [PlayerClock::fresh(control); 2],
            blink: false,
            half_second: false,
            mux: Multiplexer::new(),
            store,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time_control(&self) -> TimeControl {
        self.control
    }

    pub fn clock(&self, player: Player) -> PlayerClock {
        self.clocks[player.index()]
    }

    /// Player whose clock is counting down, if any.
    pub fn active_player(&self) -> Option<Player> {
        match self.state {
            GameState::Running(player) => Some(player),
            _ => None,
        }
    }

    /// Low-time warning is on.
    pub fn is_blinking(&self) -> bool {
        self.blink
    }

    /// Current digit cursor position.
    pub fn digit_position(&self) -> u8 {
        self.mux.position()
    }

    /// The buzzer should be sounding.
    pub fn alarm_active(&self) -> bool {
        matches!(self.state, GameState::Finished { seconds, .. } if seconds < self.config.alarm_seconds)
    }

    pub fn store(&mut self) -> &mut ElapsedStore<S> {
        &mut self.store
    }

    /// Applies the selector reading. Only has an effect while `Idle`.
    pub fn sample_selector(&mut self, level: SelectorLevel) {
        if self.state != GameState::Idle {
            return;
        }
        let control = self.config.control_for(level);
        #[cfg(feature = "defmt")]
        if control != self.control {
            defmt::info!("Time control {}", control);
        }
        self.control = control;
        self.reset_clocks();
    }

    /// Handles a button press.
    ///
    /// The transition is applied before any storage or telemetry I/O, so an
    /// error still leaves the context in the new state.
    pub fn on_event<W: Write>(&mut self, event: Event, telemetry: &mut W) -> Result<(), Error<S::Error, W::Error>> {
        match (self.state, event) {
            (GameState::Blanking { .. }, _) => Ok(()),
            (GameState::ResultDisplay(view), _) if view.settle_ticks > 0 => Ok(()),
            (GameState::Finished { .. }, Event::SwitchToA | Event::SwitchToB) => Ok(()),
            (GameState::Running(active), Event::SwitchToA | Event::SwitchToB)
                if event.switch_target() == Some(active) =>
            {
                Ok(())
            }
            (GameState::Idle | GameState::Running(_), Event::SwitchToA | Event::SwitchToB) => {
                if let Some(next) = event.switch_target() {
                    if self.state == GameState::Idle {
                        self.blink = false;
                    }
                    self.hand_over(next);
                }
                Ok(())
            }
            (GameState::ResultDisplay(_), Event::SwitchToA | Event::SwitchToB) => {
                if let Some(next) = event.switch_target() {
                    // New game from a reported one: don't resume a stale value
                    self.clocks[next.index()] = PlayerClock::fresh(self.control);
                    self.blink = false;
                    self.hand_over(next);
                }
                Ok(())
            }
            (_, Event::ShowResult) => self.show_result(telemetry),
        }
    }

    /// Handles one tick of the 2 Hz tick source.
    pub fn on_tick(&mut self) -> Result<(), S::Error> {
        match self.state {
            GameState::Blanking { next, ticks_left } => {
                if ticks_left > 1 {
                    self.state = GameState::Blanking {
                        next,
                        ticks_left: ticks_left - 1,
                    };
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Clock {} running", next);
                    self.state = GameState::Running(next);
                }
                Ok(())
            }
            GameState::ResultDisplay(mut view) => {
                view.settle_ticks = view.settle_ticks.saturating_sub(1);
                self.state = GameState::ResultDisplay(view);
                Ok(())
            }
            GameState::Running(player) => {
                let full_second = self.half_second;
                self.half_second = !self.half_second;
                if full_second {
                    self.count_down(player)
                } else {
                    Ok(())
                }
            }
            GameState::Finished { expired, seconds } => {
                let full_second = self.half_second;
                self.half_second = !self.half_second;
                if full_second {
                    let seconds = seconds + 1;
                    if seconds >= self.config.alarm_seconds {
                        #[cfg(feature = "defmt")]
                        defmt::info!("Alarm over");
                        self.enter_idle();
                    } else {
                        self.state = GameState::Finished { expired, seconds };
                    }
                }
                Ok(())
            }
            GameState::Idle => Ok(()),
        }
    }

    /// Renders the next digit from the fast multiplex timer.
    ///
    /// The result display is not drawn here; the main loop draws it through
    /// [`GameContext::poll_static`].
    pub fn on_refresh(&mut self, sink: &mut impl SegmentSink) {
        if matches!(self.state, GameState::ResultDisplay(_)) {
            return;
        }
        match self.frame() {
            Some(_) if self.blink && !self.half_second && self.active_player().is_some() => sink.blank(),
            Some(frame) => self.mux.show_next(&frame, sink),
            None => sink.blank(),
        }
    }

    /// Renders the next digit of the result display. No-op in other states.
    pub fn poll_static(&mut self, sink: &mut impl SegmentSink) {
        if !matches!(self.state, GameState::ResultDisplay(_)) {
            return;
        }
        match self.frame() {
            Some(frame) => self.mux.show_next(&frame, sink),
            None => sink.blank(),
        }
    }

    /// What the panels should show right now, `None` for dark.
    pub fn frame(&self) -> Option<Frame> {
        match self.state {
            GameState::Idle => Some(Frame::clock(Panels::Both, self.control.minutes(), 0)),
            GameState::Blanking { .. } => None,
            GameState::Running(player) => Some(Frame::remaining(Panels::One(player), &self.clock(player))),
            GameState::ResultDisplay(view) if view.settle_ticks > 0 => None,
            GameState::ResultDisplay(view) => {
                Some(Frame::elapsed(Panels::One(view.shown), &view.elapsed(view.shown)))
            }
            GameState::Finished { expired, .. } => {
                Some(Frame::remaining(Panels::One(expired), &self.clock(expired)))
            }
        }
    }

    /// Freezes the current clock and starts the pause before `next` runs.
    fn hand_over(&mut self, next: Player) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Handing over to {}", next);
        self.state = GameState::Blanking {
            next,
            ticks_left: self.config.switch_settle_ticks.max(1),
        };
        self.mux.reset();
    }

    /// One full second for `player`.
    fn count_down(&mut self, player: Player) -> Result<(), S::Error> {
        let clock = &mut self.clocks[player.index()];
        match clock.count_down(self.config.blink_seconds) {
            Countdown::Counted => {
                let elapsed = clock.elapsed(self.control);
                self.store.commit(player, elapsed)
            }
            Countdown::LowTime => {
                #[cfg(feature = "defmt")]
                defmt::info!("Player {} low on time", player);
                self.blink = true;
                let elapsed = clock.elapsed(self.control);
                self.store.commit(player, elapsed)
            }
            Countdown::Expired => {
                #[cfg(feature = "defmt")]
                defmt::info!("Player {} out of time", player);
                self.blink = false;
                self.state = GameState::Finished {
                    expired: player,
                    seconds: 0,
                };
                self.store.commit(player, Elapsed::full(self.control))
            }
        }
    }

    /// Reads the stored elapsed times and shows them.
    ///
    /// Reports over telemetry only when arriving from outside the result
    /// display; pressing again just flips the shown panel.
    fn show_result<W: Write>(&mut self, telemetry: &mut W) -> Result<(), Error<S::Error, W::Error>> {
        let previous = self.state;
        let shown = match previous {
            GameState::ResultDisplay(view) => view.shown.opponent(),
            _ => Player::A,
        };
        let settle_ticks = self.config.result_settle_ticks;
        self.state = GameState::ResultDisplay(ResultView {
            a: Elapsed::ZERO,
            b: Elapsed::ZERO,
            shown,
            settle_ticks,
        });
        self.mux.reset();

        let a = self.store.load(Player::A).map_err(Error::Storage)?;
        let b = self.store.load(Player::B).map_err(Error::Storage)?;
        self.state = GameState::ResultDisplay(ResultView {
            a,
            b,
            shown,
            settle_ticks,
        });
        #[cfg(feature = "defmt")]
        defmt::info!("Result A {} B {}", a, b);

        if matches!(previous, GameState::ResultDisplay(_)) {
            Ok(())
        } else {
            report::write_report(telemetry, a, b)
        }
    }

    fn enter_idle(&mut self) {
        self.state = GameState::Idle;
        self.blink = false;
        self.half_second = false;
        self.mux.reset();
        self.reset_clocks();
    }

    fn reset_clocks(&mut self) {
        self.clocks = [PlayerClock::fresh(self.control); 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponents() {
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.opponent().opponent(), Player::B);
    }

    #[test]
    fn switch_targets() {
        assert_eq!(Event::SwitchToA.switch_target(), Some(Player::A));
        assert_eq!(Event::SwitchToB.switch_target(), Some(Player::B));
        assert_eq!(Event::ShowResult.switch_target(), None);
    }
}
