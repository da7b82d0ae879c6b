//! Property tests for the countdown arithmetic and the persisted record.

mod common;

use chess_clock::config::BLINK_SECONDS;
use chess_clock::persist::ElapsedStore;
use chess_clock::{Countdown, Elapsed, Player, PlayerClock, TimeControl};
use common::MemStorage;
use proptest::prelude::*;

fn any_control() -> impl Strategy<Value = TimeControl> {
    prop_oneof![
        Just(TimeControl::Bullet),
        Just(TimeControl::Blitz),
        Just(TimeControl::Rapid),
    ]
}

proptest! {
    #[test]
    fn count_down_keeps_clock_in_range(minutes in 0u8..=99, seconds in 0u8..60) {
        let mut clock = PlayerClock::new(minutes, seconds).unwrap();
        let before = clock.total_seconds();
        let outcome = clock.count_down(BLINK_SECONDS);

        prop_assert!(clock.seconds() < 60);
        match outcome {
            Countdown::Expired => {
                prop_assert_eq!(before, 0);
                prop_assert_eq!(clock, PlayerClock::ZERO);
            }
            _ => prop_assert_eq!(clock.total_seconds() + 1, before),
        }
    }

    #[test]
    fn borrow_yields_fifty_nine(minutes in 1u8..=99) {
        let mut clock = PlayerClock::new(minutes, 0).unwrap();
        clock.count_down(BLINK_SECONDS);
        prop_assert_eq!(clock, PlayerClock::new(minutes - 1, 59).unwrap());
    }

    #[test]
    fn low_time_only_at_zero_fifteen(minutes in 0u8..=20, seconds in 0u8..60) {
        let mut clock = PlayerClock::new(minutes, seconds).unwrap();
        let outcome = clock.count_down(BLINK_SECONDS);
        let at_threshold = clock == PlayerClock::new(0, BLINK_SECONDS).unwrap() && outcome != Countdown::Expired;
        prop_assert_eq!(outcome == Countdown::LowTime, at_threshold);
    }

    #[test]
    fn whole_game_reaches_low_time_once_then_expires(control in any_control()) {
        let mut clock = PlayerClock::fresh(control);
        let mut low_time = 0;
        let mut seconds = 0u32;
        loop {
            seconds += 1;
            match clock.count_down(BLINK_SECONDS) {
                Countdown::LowTime => low_time += 1,
                Countdown::Expired => break,
                Countdown::Counted => {}
            }
        }
        prop_assert_eq!(low_time, 1);
        prop_assert_eq!(seconds, u32::from(control.total_seconds()));
    }

    #[test]
    fn elapsed_is_budget_minus_remaining(
        (control, used) in any_control().prop_flat_map(|c| (Just(c), 1..=c.total_seconds()))
    ) {
        let remaining = control.total_seconds() - used;
        let clock = PlayerClock::new((remaining / 60) as u8, (remaining % 60) as u8).unwrap();
        let elapsed = clock.elapsed(control);
        prop_assert!(elapsed.seconds < 60);
        prop_assert_eq!(u16::from(elapsed.minutes) * 60 + u16::from(elapsed.seconds), used);
    }

    #[test]
    fn committed_record_reads_back(minutes in 0u8..=99, seconds in 0u8..60, b_side in any::<bool>()) {
        let player = if b_side { Player::B } else { Player::A };
        let mut store = ElapsedStore::new(MemStorage::new(8), 2);
        let elapsed = Elapsed { minutes, seconds };
        store.commit(player, elapsed).unwrap();
        prop_assert_eq!(store.load(player).unwrap(), elapsed);
        prop_assert_eq!(store.load(player.opponent()).unwrap(), Elapsed::ZERO);
    }
}
