//! The per-table game state machine.
//!
//! One `GameState` drives a single table through betting rounds, showdown,
//! and the between-hand hold. It never touches the wall clock itself; every
//! entry point takes `now`, so the registry supplies real time and tests
//! supply whatever they need. All mutation happens under the registry's
//! per-table lock.

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::constants::{
    ANTE, BOT_NAMES, BOT_TURN_SECS, BRING_IN, HIGH, HUMAN_TURN_SECS, IDLE_EVICT_SECS,
    LAST_BETTING_ROUND, LOW, MAX_FORCED_MOVES, MAX_SEATS, SHOWDOWN_HOLD_SECS, WAITING_MESSAGE,
};
use super::entities::{Card, Chips, Deck, MoveCode, Seat, SeatStatus, ValidMove};
use super::ranking::{eval_five, rank_key, showdown};
use crate::table::lobby::LobbyUpdate;

pub struct GameState {
    /// Case-folded registry key.
    pub table: String,
    /// Human-facing room name; empty for adhoc tables.
    pub display_name: String,
    pub seats: Vec<Seat>,
    pub deck: Deck,
    /// 0 = pre-hand, 1..=4 betting streets, 5 = showdown hold.
    pub round: u8,
    pub pot: Chips,
    /// Highest total bet this round.
    pub current_bet: Chips,
    pub active_seat: Option<usize>,
    pub move_deadline: DateTime<Utc>,
    pub last_result: String,
    pub game_over: bool,
    pub won_by_folds: bool,
    pub is_mock: bool,
    pub register_lobby: bool,
    lobby_dirty: bool,
    rng: ChaCha20Rng,
}

impl GameState {
    fn create(
        table: &str,
        display_name: &str,
        is_mock: bool,
        register_lobby: bool,
        seed: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            table: table.to_string(),
            display_name: display_name.to_string(),
            seats: Vec::new(),
            deck: Deck::default(),
            round: 0,
            pot: 0,
            current_bet: 0,
            active_seat: None,
            move_deadline: now,
            last_result: String::new(),
            game_over: false,
            won_by_folds: false,
            is_mock,
            register_lobby,
            lobby_dirty: false,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A practice table: seat 0 is the client's seat (claimed on the first
    /// named request), every other seat a bot. Never registered anywhere.
    pub fn new_mock(table: &str, seat_count: usize, seed: u64, now: DateTime<Utc>) -> Self {
        let seat_count = seat_count.clamp(2, MAX_SEATS);
        let mut state = Self::create(table, "", true, false, seed, now);
        for i in 0..seat_count {
            state.add_seat(BOT_NAMES[i], true, now);
        }
        log::info!("created mock table '{}' with {seat_count} seats", state.table);
        state
    }

    /// A live room: humans join by name, turn clocks apply, and the lobby
    /// hears about membership changes when `register_lobby` is set.
    pub fn new_real(
        table: &str,
        display_name: &str,
        bot_count: usize,
        register_lobby: bool,
        seed: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let mut state = Self::create(table, display_name, false, register_lobby, seed, now);
        for i in 0..bot_count.min(MAX_SEATS) {
            state.add_seat(BOT_NAMES[i], true, now);
        }
        if state.seats.len() < 2 {
            state.last_result = WAITING_MESSAGE.to_string();
        }
        state.lobby_dirty = true;
        log::info!(
            "created table '{}' ({display_name}) with {bot_count} bots",
            state.table
        );
        state
    }

    pub fn add_seat(&mut self, name: &str, is_bot: bool, now: DateTime<Utc>) {
        let name = if is_bot {
            format!("{name} BOT")
        } else {
            name.to_string()
        };
        self.seats.push(Seat::new(name, is_bot, now));
    }

    /// Top a mock table up to `seat_count` by appending waiting bots.
    /// Shrinking is handled by the registry, which rebuilds the table.
    pub fn grow_mock(&mut self, seat_count: usize, now: DateTime<Utc>) {
        if seat_count <= self.seats.len() || seat_count > MAX_SEATS {
            return;
        }
        for i in self.seats.len()..seat_count {
            self.add_seat(BOT_NAMES[i], true, now);
        }
    }

    /// Map a request's `player` name to a seat, appending a new seat when a
    /// real table has room. A full table yields `None`: the caller watches
    /// as a spectator. On a mock table the viewer is always seat 0, and the
    /// first named request claims that seat for the human.
    pub fn resolve_viewer(&mut self, player: &str, now: DateTime<Utc>) -> Option<usize> {
        if self.is_mock {
            if self.seats.is_empty() {
                return None;
            }
            if !player.is_empty() && self.seats[0].is_bot {
                self.seats[0].name = player.to_string();
                self.seats[0].is_bot = false;
                self.seats[0].last_seen = now;
            }
            return Some(0);
        }

        if player.is_empty() {
            return None;
        }
        if let Some(idx) = self
            .seats
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(player))
        {
            return Some(idx);
        }
        if self.seats.len() < MAX_SEATS {
            self.add_seat(player, false, now);
            self.lobby_dirty = true;
            return Some(self.seats.len() - 1);
        }
        None
    }

    pub fn touch(&mut self, seat: usize, now: DateTime<Utc>) {
        if let Some(seat) = self.seats.get_mut(seat) {
            seat.last_seen = now;
        }
    }

    pub fn human_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_bot).count()
    }

    pub fn bot_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_bot).count()
    }

    fn playing_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status == SeatStatus::Playing)
            .count()
    }

    /// Start the next street, or the next hand when `round` was 0.
    pub fn new_round(&mut self, now: DateTime<Utc>) {
        if self.round > 0 && self.playing_count() < 2 {
            self.end_game(now);
            return;
        }

        self.round += 1;

        // Clear the pot first so the antes land in an empty one.
        if self.round == 1 {
            self.pot = 0;
        }

        for seat in &mut self.seats {
            if self.round > 1 {
                self.pot += seat.bet;
            } else if seat.purse > 2 {
                seat.status = SeatStatus::Playing;
                seat.purse -= ANTE;
                self.pot += ANTE;
                seat.cards.clear();
            } else {
                // Cannot cover the ante; sit this hand out.
                seat.status = SeatStatus::Waiting;
                seat.cards.clear();
            }
            seat.last_move.clear();
            seat.bet = 0;
        }

        self.current_bet = 0;

        // A fresh hand reshuffles and deals the hole card as an extra pass.
        if self.round == 1 {
            self.deck.shuffle(&mut self.rng);
            self.deal_cards();
        }
        self.deal_cards();

        self.active_seat = self.first_to_act(self.round > 1);
        self.reset_turn_deadline(now);
    }

    fn deal_cards(&mut self) {
        for i in 0..self.seats.len() {
            if self.seats[i].status == SeatStatus::Playing {
                let card = self.deck.deal();
                self.seats[i].cards.push(card);
            }
        }
    }

    /// Seat owed the next action: best visible up-cards when `high_hand`,
    /// worst when the bring-in is being assigned on round 1.
    pub fn first_to_act(&self, high_hand: bool) -> Option<usize> {
        let mut keyed: Vec<(usize, Vec<i32>)> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status == SeatStatus::Playing)
            .map(|(i, s)| (i, rank_key(s.cards.get(1..).unwrap_or(&[]))))
            .collect();
        if keyed.is_empty() {
            return None;
        }
        keyed.sort_by(|a, b| a.1.cmp(&b.1));
        let pick = if high_hand {
            keyed.first()
        } else {
            keyed.last()
        };
        pick.map(|&(i, _)| i)
    }

    fn reset_turn_deadline(&mut self, now: DateTime<Utc>) {
        let secs = match self.active_seat {
            Some(idx) if self.seats[idx].is_bot => BOT_TURN_SECS,
            _ => HUMAN_TURN_SECS,
        };
        self.move_deadline = now + Duration::seconds(secs);
    }

    /// The betting round is over when control has come back around: either
    /// the active seat already matches the standing bet, or nothing was bet
    /// and the active seat has a move on record.
    pub fn round_complete(&self) -> bool {
        let Some(idx) = self.active_seat else {
            return false;
        };
        let seat = &self.seats[idx];
        (self.current_bet > 0 && seat.bet == self.current_bet)
            || (self.current_bet == 0 && !seat.last_move.is_empty())
    }

    /// The valid-move menu for the active seat. Menu order is part of the
    /// protocol: forced moves and bot choices are indices into it.
    pub fn valid_moves(&self) -> Vec<ValidMove> {
        let mut moves = Vec::new();
        let Some(idx) = self.active_seat else {
            return moves;
        };
        let seat = &self.seats[idx];

        // Everyone after the bring-in may fold.
        if self.current_bet > 0 || self.round > 1 {
            moves.push(ValidMove::new(MoveCode::Fold, "Fold"));
        }

        if self.current_bet < LOW {
            if self.current_bet == 0 {
                if self.round == 1 {
                    moves.push(ValidMove::new(MoveCode::BringIn, format!("Post {BRING_IN}")));
                } else {
                    moves.push(ValidMove::new(MoveCode::Check, "Check"));
                }
            } else if seat.purse >= self.current_bet - seat.bet {
                moves.push(ValidMove::new(MoveCode::Call, "Call"));
            }
            if self.round < 3 && seat.purse >= LOW {
                moves.push(ValidMove::new(MoveCode::BetLow, format!("Bet {LOW}")));
            } else if self.round > 2 && seat.purse >= HIGH {
                moves.push(ValidMove::new(MoveCode::BetHigh, format!("Bet {HIGH}")));
            }
        } else {
            if seat.purse >= self.current_bet - seat.bet {
                moves.push(ValidMove::new(MoveCode::Call, "Call"));
            }
            if seat.purse >= self.current_bet - seat.bet + LOW {
                moves.push(ValidMove::new(MoveCode::RaiseLow, format!("Raise {LOW}")));
            }
        }

        moves
    }

    /// Perform a client-requested move for the active seat. Returns false
    /// (with no mutation) when the move is not currently valid.
    pub fn perform_move(&mut self, code: MoveCode, now: DateTime<Utc>) -> bool {
        if let Some(idx) = self.active_seat {
            self.touch(idx, now);
        }
        self.apply_move(code, now)
    }

    fn apply_move(&mut self, code: MoveCode, now: DateTime<Utc>) -> bool {
        let Some(idx) = self.active_seat else {
            return false;
        };
        if self.seats[idx].status != SeatStatus::Playing {
            return false;
        }
        if !self.valid_moves().iter().any(|m| m.code == code) {
            return false;
        }

        match code {
            MoveCode::Fold => self.seats[idx].status = SeatStatus::Folded,
            MoveCode::Check => {}
            _ => {
                let raise = match code {
                    MoveCode::BringIn => BRING_IN,
                    MoveCode::BetHigh | MoveCode::RaiseHigh => HIGH,
                    // Betting low over the bring-in tops the total up to LOW
                    // rather than stacking on it.
                    MoveCode::BetLow | MoveCode::RaiseLow if self.current_bet == BRING_IN => {
                        LOW - BRING_IN
                    }
                    MoveCode::BetLow | MoveCode::RaiseLow => LOW,
                    _ => 0,
                };
                let delta = self.current_bet + raise - self.seats[idx].bet;
                self.current_bet += raise;
                let seat = &mut self.seats[idx];
                seat.bet += delta;
                seat.purse -= delta;
            }
        }

        self.seats[idx].last_move = code.label().to_string();
        self.next_valid_player(now);
        true
    }

    /// Advance clockwise to the next PLAYING seat and restart its clock.
    fn next_valid_player(&mut self, now: DateTime<Utc>) {
        let n = self.seats.len();
        let Some(start) = self.active_seat else {
            return;
        };
        self.active_seat = None;
        for step in 1..=n {
            let idx = (start + step) % n;
            if self.seats[idx].status == SeatStatus::Playing {
                self.active_seat = Some(idx);
                break;
            }
        }
        self.reset_turn_deadline(now);
    }

    /// Settle the hand: fold outstanding bets into the pot, split it among
    /// the top-ranked survivors (integer shares, the house keeps any
    /// remainder), and park the table in the showdown hold.
    pub fn end_game(&mut self, now: DateTime<Utc>) {
        self.game_over = true;
        self.active_seat = None;
        self.round = 5;

        let mut remaining = Vec::new();
        for i in 0..self.seats.len() {
            self.pot += self.seats[i].bet;
            self.seats[i].bet = 0;
            if self.seats[i].status == SeatStatus::Playing {
                remaining.push(i);
            }
        }

        if remaining.is_empty() {
            self.won_by_folds = true;
            self.last_result = WAITING_MESSAGE.to_string();
            self.move_deadline = now + Duration::seconds(SHOWDOWN_HOLD_SECS);
            return;
        }

        if remaining.len() == 1 {
            self.won_by_folds = true;
            let winner = remaining[0];
            self.seats[winner].purse += self.pot;
            self.last_result = format!("{} won by default", self.seats[winner].name);
        } else {
            self.won_by_folds = false;
            let pockets: Vec<Vec<Card>> = remaining
                .iter()
                .map(|&i| self.seats[i].cards.clone())
                .collect();
            let (order, pivot) = showdown(&pockets);
            let share = self.pot / pivot as Chips;
            let mut winners = Vec::with_capacity(pivot);
            for &slot in order.iter().take(pivot) {
                let idx = remaining[slot];
                self.seats[idx].purse += share;
                winners.push(self.seats[idx].name.clone());
            }
            let best = eval_five(&pockets[order[0]]);
            self.last_result = format!("{} won with {best}", winners.join(" and "));
        }

        self.move_deadline = now + Duration::seconds(SHOWDOWN_HOLD_SECS);
        log::info!("table '{}': {}", self.table, self.last_result);
    }

    /// One step of the table, driven by an inbound request. Refreshes the
    /// requester's presence, advances rounds, and absorbs every overdue
    /// forced move up to a bounded cap so a stalled all-bot table cannot
    /// pin the worker.
    pub fn run_game_logic(&mut self, viewer: Option<usize>, now: DateTime<Utc>) {
        if let Some(idx) = viewer {
            self.touch(idx, now);
        }

        if self.seats.len() < 2 {
            return;
        }

        if self.round == 0 {
            self.new_round(now);
            return;
        }

        if self.game_over {
            // The hold has elapsed: sweep the idle, start the next hand.
            if now >= self.move_deadline {
                self.drop_inactive_seats(now);
                self.round = 0;
                self.game_over = false;
                if self.seats.len() >= 2 {
                    self.new_round(now);
                }
            }
            return;
        }

        for _ in 0..MAX_FORCED_MOVES {
            // A dropped seat still counts until the hand resolves.
            let alive = self
                .seats
                .iter()
                .filter(|s| matches!(s.status, SeatStatus::Playing | SeatStatus::Left))
                .count();
            if alive == 1 {
                self.end_game(now);
                return;
            }

            let Some(active) = self.active_seat else {
                return;
            };

            if self.round_complete() {
                if self.round == LAST_BETTING_ROUND {
                    self.end_game(now);
                } else {
                    self.new_round(now);
                }
                return;
            }

            if !self.is_mock {
                if now < self.move_deadline {
                    return;
                }
            } else if !self.seats[active].is_bot {
                return;
            }

            if self.seats[active].status != SeatStatus::Playing {
                return;
            }

            let moves = self.valid_moves();
            if moves.is_empty() {
                return;
            }
            let choice = if self.seats[active].is_bot {
                let ctx = crate::bot::BotContext {
                    moves: &moves,
                    cards: &self.seats[active].cards,
                    current_bet: self.current_bet,
                    round: self.round,
                    has_best_visible: self.first_to_act(true) == Some(active),
                };
                crate::bot::choose_move(&ctx, &mut self.rng)
            } else {
                crate::bot::forced_choice(&moves)
            };
            let code = moves[choice.min(moves.len() - 1)].code;
            self.apply_move(code, now);
        }
    }

    /// Remove seats that left, plus humans not seen within the idle window.
    /// Runs between hands only, so seat indices are not live.
    pub fn drop_inactive_seats(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::seconds(IDLE_EVICT_SECS);
        let before = self.seats.len();
        self.seats
            .retain(|s| s.status != SeatStatus::Left && (s.is_bot || s.last_seen > cutoff));
        if self.seats.len() < 2 {
            self.last_result = WAITING_MESSAGE.to_string();
        }
        if self.seats.len() != before {
            self.lobby_dirty = true;
        }
    }

    /// Mark the viewer's seat LEFT. When nobody is left playing the hand is
    /// settled immediately; when the leaver held the action, the turn moves
    /// on so the hand cannot stall on an empty chair.
    pub fn client_leave(&mut self, viewer: usize, now: DateTime<Utc>) {
        if viewer >= self.seats.len() {
            return;
        }
        self.touch(viewer, now);
        let was_active = self.active_seat == Some(viewer);
        let seat = &mut self.seats[viewer];
        seat.status = SeatStatus::Left;
        seat.last_move = "LEFT".to_string();

        if self.playing_count() == 0 {
            self.end_game(now);
            self.drop_inactive_seats(now);
        } else if was_active {
            self.next_valid_player(now);
        }
    }

    pub fn mark_lobby_dirty(&mut self) {
        self.lobby_dirty = true;
    }

    /// Collect a pending lobby notification, if this table produces them.
    /// Mock and unlisted tables never do. The caller publishes after the
    /// table lock is released.
    pub fn take_lobby_update(&mut self) -> Option<LobbyUpdate> {
        if !self.lobby_dirty {
            return None;
        }
        self.lobby_dirty = false;
        if self.is_mock || !self.register_lobby {
            return None;
        }
        Some(LobbyUpdate {
            table: self.table.clone(),
            name: self.display_name.clone(),
            slots: MAX_SEATS,
            filled: self.seats.len(),
        })
    }

    /// Total chips this table is responsible for. Useful for conservation
    /// checks; the live game never consults it.
    pub fn total_chips(&self) -> Chips {
        self.pot
            + self
                .seats
                .iter()
                .map(|s| s.purse + s.bet)
                .sum::<Chips>()
    }

    #[doc(hidden)]
    pub fn rig_deck(&mut self, cards: [Card; 52]) {
        self.deck = Deck::fixed(cards);
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("table", &self.table)
            .field("round", &self.round)
            .field("pot", &self.pot)
            .field("current_bet", &self.current_bet)
            .field("active_seat", &self.active_seat)
            .field("seats", &self.seats.len())
            .field("game_over", &self.game_over)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::STARTING_PURSE;
    use crate::game::entities::Suit::{Club, Diamond, Heart, Spade};

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Deck that deals seat 0 the best up-card so seat 1 posts the
    /// bring-in on a two-seat table.
    fn stacked_deck() -> [Card; 52] {
        let mut plain = Deck::default();
        let mut pool: Vec<Card> = (0..52).map(|_| plain.deal()).collect();
        let head = [
            Card(9, Club),     // seat 0 hole
            Card(5, Diamond),  // seat 1 hole
            Card(13, Spade),   // seat 0 up: best board
            Card(2, Club),     // seat 1 up: bring-in
        ];
        let mut cards = [Card(2, Club); 52];
        let mut cursor = head.len();
        for (slot, card) in cards.iter_mut().zip(head.iter()) {
            *slot = *card;
        }
        pool.retain(|c| !head.contains(c));
        for card in pool {
            cards[cursor] = card;
            cursor += 1;
        }
        cards
    }

    fn two_human_table() -> GameState {
        let t = now();
        let mut state = GameState::new_real("t", "Test", 0, false, 1, t);
        state.add_seat("alice", false, t);
        state.add_seat("bob", false, t);
        state.rig_deck(stacked_deck());
        state
    }

    #[test]
    fn first_hand_antes_and_deals_two_cards() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);

        assert_eq!(state.round, 1);
        assert_eq!(state.pot, 2);
        for seat in &state.seats {
            assert_eq!(seat.status, SeatStatus::Playing);
            assert_eq!(seat.purse, STARTING_PURSE - ANTE);
            assert_eq!(seat.cards.len(), 2);
        }
        // Worst visible up-card opens round 1.
        assert_eq!(state.active_seat, Some(1));
    }

    #[test]
    fn bring_in_menu_has_no_fold() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);

        let codes: Vec<MoveCode> = state.valid_moves().iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![MoveCode::BringIn, MoveCode::BetLow]);
    }

    #[test]
    fn bet_low_over_bring_in_totals_low() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);

        assert!(state.perform_move(MoveCode::BringIn, t));
        assert_eq!(state.current_bet, BRING_IN);
        assert_eq!(state.active_seat, Some(0));

        let codes: Vec<MoveCode> = state.valid_moves().iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![MoveCode::Fold, MoveCode::Call, MoveCode::BetLow]);

        assert!(state.perform_move(MoveCode::BetLow, t));
        assert_eq!(state.current_bet, LOW);
        assert_eq!(state.seats[0].bet, LOW);
    }

    #[test]
    fn late_round_menu_caps_at_low_raises() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.round = 3;
        state.current_bet = HIGH;
        state.seats[1].bet = HIGH;
        state.active_seat = Some(0);

        let codes: Vec<MoveCode> = state.valid_moves().iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![MoveCode::Fold, MoveCode::Call, MoveCode::RaiseLow]);
    }

    #[test]
    fn invalid_move_mutates_nothing() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);

        let pot = state.pot;
        let active = state.active_seat;
        // FOLD is not on the bring-in menu.
        assert!(!state.perform_move(MoveCode::Fold, t));
        assert_eq!(state.pot, pot);
        assert_eq!(state.active_seat, active);
        assert_eq!(state.seats[1].status, SeatStatus::Playing);
    }

    #[test]
    fn checks_around_complete_the_round() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.perform_move(MoveCode::BringIn, t);
        state.perform_move(MoveCode::Call, t);

        // Back at the bring-in seat with the bet matched.
        assert!(state.round_complete());
        state.run_game_logic(Some(0), t);
        assert_eq!(state.round, 2);
        assert_eq!(state.pot, 2 + 2 * BRING_IN);
        for seat in &state.seats {
            assert_eq!(seat.bet, 0);
            assert!(seat.last_move.is_empty());
        }
    }

    #[test]
    fn round_two_action_goes_to_best_board() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.perform_move(MoveCode::BringIn, t);
        state.perform_move(MoveCode::Call, t);
        state.run_game_logic(Some(0), t);

        assert_eq!(state.round, 2);
        let best = state.first_to_act(true);
        assert_eq!(state.active_seat, best);
        assert_eq!(
            state.seats[state.active_seat.unwrap()].status,
            SeatStatus::Playing
        );
    }

    #[test]
    fn fold_cascade_ends_hand_by_default() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.perform_move(MoveCode::BringIn, t);

        // Seat 0 folds to the bring-in; one player remains.
        assert!(state.perform_move(MoveCode::Fold, t));
        state.run_game_logic(Some(0), t);

        assert!(state.game_over);
        assert!(state.won_by_folds);
        assert_eq!(state.round, 5);
        assert_eq!(state.active_seat, None);
        assert!(state.last_result.contains("won by default"));
        // Winner recovered the ante plus the bring-in.
        assert_eq!(state.seats[1].purse, STARTING_PURSE - ANTE - BRING_IN + 4);
    }

    #[test]
    fn broke_seats_sit_out_the_next_hand() {
        let t = now();
        let mut state = two_human_table();
        state.add_seat("carol", false, t);
        state.seats[2].purse = 2;
        state.new_round(t);

        assert_eq!(state.seats[2].status, SeatStatus::Waiting);
        assert!(state.seats[2].cards.is_empty());
        assert_eq!(state.pot, 2);
    }

    #[test]
    fn leave_mid_hand_passes_the_action_on() {
        let t = now();
        let mut state = two_human_table();
        state.add_seat("carol", false, t);
        state.new_round(t);

        let active = state.active_seat.unwrap();
        state.client_leave(active, t);
        assert_eq!(state.seats[active].status, SeatStatus::Left);
        assert_eq!(state.seats[active].last_move, "LEFT");
        let next = state.active_seat.unwrap();
        assert_ne!(next, active);
        assert_eq!(state.seats[next].status, SeatStatus::Playing);
    }

    #[test]
    fn last_leaver_ends_and_clears_the_table() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);

        state.client_leave(0, t);
        state.client_leave(1, t);

        assert!(state.game_over);
        assert!(state.seats.is_empty());
        assert_eq!(state.last_result, WAITING_MESSAGE);
    }

    #[test]
    fn idle_humans_are_swept_between_hands() {
        let t = now();
        let mut state = GameState::new_real("t", "Test", 1, true, 1, t);
        state.add_seat("harold", false, t);
        let _ = state.take_lobby_update();

        state.seats[1].last_seen = t - Duration::minutes(6);
        state.drop_inactive_seats(t);

        assert_eq!(state.seats.len(), 1);
        assert!(state.seats[0].is_bot);
        let update = state.take_lobby_update().expect("eviction republishes");
        assert_eq!(update.filled, 1);
        assert_eq!(state.last_result, WAITING_MESSAGE);
    }

    #[test]
    fn mock_tables_never_notify_the_lobby() {
        let t = now();
        let mut state = GameState::new_mock("m", 3, 1, t);
        state.mark_lobby_dirty();
        assert!(state.take_lobby_update().is_none());
    }

    #[test]
    fn human_timeout_is_forced_check_else_fold() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.perform_move(MoveCode::BringIn, t);

        // Seat 0 owes a call and stalls past its clock.
        let late = t + Duration::seconds(HUMAN_TURN_SECS + 1);
        state.run_game_logic(Some(1), late);

        assert_eq!(state.seats[0].status, SeatStatus::Folded);
        assert_eq!(state.seats[0].last_move, "FOLD");
    }

    #[test]
    fn timeout_with_free_check_checks_instead() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.perform_move(MoveCode::BringIn, t);
        state.perform_move(MoveCode::Call, t);
        state.run_game_logic(Some(0), t); // round 2, nothing bet

        let active = state.active_seat.unwrap();
        let late = t + Duration::seconds(HUMAN_TURN_SECS + 1);
        state.run_game_logic(Some(0), late);

        assert_eq!(state.seats[active].last_move, "CHECK");
        assert_eq!(state.seats[active].status, SeatStatus::Playing);
    }

    #[test]
    fn split_pot_discards_the_remainder() {
        let t = now();
        let mut state = two_human_table();
        state.new_round(t);
        state.pot = 7;
        // Identical pairs, identical kickers.
        state.seats[0].cards = vec![
            Card(14, Spade),
            Card(14, Heart),
            Card(9, Spade),
            Card(7, Diamond),
            Card(5, Club),
        ];
        state.seats[1].cards = vec![
            Card(14, Club),
            Card(14, Diamond),
            Card(9, Heart),
            Card(7, Club),
            Card(5, Diamond),
        ];
        state.seats[0].bet = 0;
        state.seats[1].bet = 0;
        let before_0 = state.seats[0].purse;
        let before_1 = state.seats[1].purse;

        state.end_game(t);

        assert!(!state.won_by_folds);
        assert_eq!(state.seats[0].purse, before_0 + 3);
        assert_eq!(state.seats[1].purse, before_1 + 3);
        assert!(state.last_result.contains(" and "));
    }
}
