//! End-to-end hand scenarios driven the way the server drives them: one
//! state-machine step per poll, with explicit clocks.

use chrono::{DateTime, Duration, TimeZone, Utc};
use stud_poker::entities::{Card, Deck, SeatStatus};
use stud_poker::constants::{MAX_SEATS, STARTING_PURSE};
use stud_poker::game::entities::Suit::{Club, Diamond, Heart, Spade};
use stud_poker::{GameState, MoveCode};

fn start_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Deck whose first `head.len()` cards are fixed, with the rest of the
/// pack behind them in canonical order.
fn deck_with_head(head: &[Card]) -> [Card; 52] {
    let mut plain = Deck::default();
    let mut pool: Vec<Card> = (0..52).map(|_| plain.deal()).collect();
    pool.retain(|c| !head.contains(c));
    let mut cards = [Card(2, Club); 52];
    cards[..head.len()].copy_from_slice(head);
    for (slot, card) in cards[head.len()..].iter_mut().zip(pool) {
        *slot = card;
    }
    cards
}

#[test]
fn all_bot_table_plays_to_showdown_under_polling() {
    let mut now = start_time();
    let mut state = GameState::new_mock("s1", 2, 0, now);
    let bankroll: u32 = state.seats.iter().map(|s| s.purse).sum();

    let mut reached_showdown = false;
    for _ in 0..30 {
        state.run_game_logic(Some(0), now);
        now += Duration::seconds(1);
        if state.game_over {
            reached_showdown = true;
            break;
        }
    }

    assert!(reached_showdown, "two bots should finish a hand in 30 polls");
    assert_eq!(state.round, 5);
    assert_eq!(state.active_seat, None);
    assert!(!state.last_result.is_empty());
    // Nothing minted: the table still accounts for every chip except the
    // split remainder left to the house.
    let accounted: u32 = state.seats.iter().map(|s| s.purse).sum();
    assert!(accounted <= bankroll);
    assert!(bankroll - accounted <= state.pot);
}

#[test]
fn claimed_seat_can_fold_and_play_moves_on() {
    let now = start_time();
    let mut state = GameState::new_mock("s2", 3, 0, now);
    state.rig_deck(deck_with_head(&[
        Card(9, Club),    // seat 0 hole
        Card(8, Diamond), // seat 1 hole
        Card(7, Heart),   // seat 2 hole
        Card(13, Spade),  // seat 0 up: acts last
        Card(3, Diamond), // seat 1 up
        Card(2, Club),    // seat 2 up: bring-in
    ]));
    assert_eq!(state.resolve_viewer("A", now), Some(0));
    assert_eq!(state.seats[0].name, "A");

    // First poll opens the hand; the next absorbs bot moves until the
    // human seat holds the action.
    state.run_game_logic(Some(0), now);
    state.run_game_logic(Some(0), now);
    assert_eq!(state.active_seat, Some(0));

    let bet_before = state.current_bet;
    let view = state.client_view(Some(0), now);
    assert!(view.valid_moves.iter().any(|m| m.code == MoveCode::Fold));

    assert!(state.perform_move(MoveCode::Fold, now));
    assert_eq!(state.seats[0].status, SeatStatus::Folded);
    assert_eq!(state.current_bet, bet_before);
    let next = state.active_seat.unwrap();
    assert_ne!(next, 0);
    assert_eq!(state.seats[next].status, SeatStatus::Playing);
}

#[test]
fn identical_hands_split_the_pot_evenly() {
    let now = start_time();
    let mut state = GameState::new_real("s3", "Split", 0, false, 0, now);
    state.add_seat("alice", false, now);
    state.add_seat("bob", false, now);
    // Dealing alternates seats, so even slots land on seat 0. Both seats
    // finish with aces over nines and the same kicker value.
    state.rig_deck(deck_with_head(&[
        Card(14, Spade),
        Card(14, Club),
        Card(14, Heart),
        Card(14, Diamond),
        Card(9, Spade),
        Card(9, Club),
        Card(9, Heart),
        Card(9, Diamond),
        Card(5, Club),
        Card(5, Heart),
    ]));

    state.run_game_logic(Some(0), now);
    assert_eq!(state.round, 1);

    // Round 1: bring-in and a flat call.
    assert!(state.perform_move(MoveCode::BringIn, now));
    assert!(state.perform_move(MoveCode::Call, now));
    state.run_game_logic(Some(0), now);
    // Rounds 2-4: everyone checks it down.
    for expected_round in 2..=4 {
        assert_eq!(state.round, expected_round);
        assert!(state.perform_move(MoveCode::Check, now));
        assert!(state.perform_move(MoveCode::Check, now));
        state.run_game_logic(Some(0), now);
    }

    assert!(state.game_over);
    assert!(!state.won_by_folds);
    assert!(state.last_result.contains(" and "), "{}", state.last_result);
    // Equal commitments, even pot, no remainder for the house.
    assert_eq!(state.seats[0].purse, STARTING_PURSE);
    assert_eq!(state.seats[1].purse, STARTING_PURSE);
}

#[test]
fn idle_human_is_evicted_when_the_next_hand_forms() {
    let mut now = start_time();
    let mut state = GameState::new_real("s4", "The Den", 1, true, 0, now);
    assert_eq!(state.resolve_viewer("H", now), Some(1));
    let _ = state.take_lobby_update();

    // H stops polling mid-session; the hand still settles.
    state.new_round(now);
    state.end_game(now);
    state.seats[1].last_seen = now - Duration::minutes(6);

    now += Duration::seconds(8);
    state.run_game_logic(None, now);

    assert_eq!(state.seats.len(), 1);
    assert!(state.seats[0].is_bot);
    let update = state.take_lobby_update().expect("eviction publishes once");
    assert_eq!(update.table, "s4");
    assert_eq!(update.slots, MAX_SEATS);
    assert_eq!(update.filled, 1);
    assert!(state.take_lobby_update().is_none());
}

#[test]
fn equal_seeds_replay_identical_games() {
    let mut now = start_time();
    let mut a = GameState::new_mock("twin", 4, 1234, now);
    let mut b = GameState::new_mock("twin", 4, 1234, now);

    for step in 0..120 {
        a.run_game_logic(Some(0), now);
        b.run_game_logic(Some(0), now);

        let va = serde_json::to_string(&a.client_view(Some(0), now)).unwrap();
        let vb = serde_json::to_string(&b.client_view(Some(0), now)).unwrap();
        assert_eq!(va, vb, "views diverged at step {step}");
        assert_eq!(a.pot, b.pot);
        assert_eq!(a.round, b.round);

        // Mix short polls with hold-expiring gaps so hands restart too.
        now += if step % 9 == 0 {
            Duration::seconds(8)
        } else {
            Duration::seconds(1)
        };
    }
}
