//! Bot decision policy.
//!
//! A bot only sees what the seat legally holds: its own cards, the valid
//! move menu, the bet ladder, and whether its board is currently best. The
//! policy picks an index into the menu; later rules override earlier ones,
//! and that ordering carries the early-round aggression behaviour.
//!
//! All dice roll through the table's RNG so a seeded table replays
//! identically.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::game::constants::{HIGH, LOW};
use crate::game::entities::{Card, Chips, MoveCode, ValidMove};
use crate::game::ranking::rank_key;

/// Everything a seat may legally consult when choosing a move.
pub struct BotContext<'a> {
    pub moves: &'a [ValidMove],
    pub cards: &'a [Card],
    pub current_bet: Chips,
    pub round: u8,
    /// Whether this seat shows the best visible hand at the table.
    pub has_best_visible: bool,
}

/// Baseline for any forced move, bot or timed-out human: fold, unless a
/// check is free.
pub fn forced_choice(moves: &[ValidMove]) -> usize {
    if moves.len() > 1 && moves[1].code == MoveCode::Check {
        1
    } else {
        0
    }
}

/// Pick a move for a bot seat. Returns an index into `ctx.moves`.
pub fn choose_move(ctx: &BotContext, rng: &mut ChaCha20Rng) -> usize {
    let moves = ctx.moves;
    let cards = ctx.cards;
    let mut choice = forced_choice(moves);

    // Hardly ever fold early while holding a jack or better.
    if ctx.round < 3
        && moves.len() > 1
        && rng.random_range(0..3) > 0
        && cards.iter().any(|c| c.0 > 10)
    {
        choice = 1;
    }

    let key = rank_key(cards);

    // Rarely fold a pair.
    if key[0] < 300 && rng.random_range(0..20) > 0 {
        choice = 1;
    }

    // Never fold two pair or better.
    if key[0] < 200 {
        choice = 1;
    }

    if moves.len() > 2 && key[0] < 312 && ctx.current_bet < LOW {
        // Three of a kind or better: raise low.
        choice = 2;
    } else if moves.len() > 2
        && ctx.has_best_visible
        && ctx.current_bet < HIGH
        && key[0] < 306
    {
        // Strong and best on board: take the biggest raise on the menu.
        choice = moves.len() - 1;
    } else if moves.len() > 1
        && rng.random_range(0..3) > 0
        && (cards.len() > 2
            || (cards.len() == 2
                && (cards[0].0 == cards[1].0
                    || cards[1].0.abs_diff(cards[0].0) < 3
                    || cards[0].0 > 8
                    || cards[1].0 > 5)))
    {
        // Speculative bet/call/raise. Avoid endless raise wars.
        if ctx.current_bet >= 20 || rng.random_range(0..3) > 0 {
            choice = 1;
        } else {
            choice = rng.random_range(1..moves.len());
        }
    }

    choice
}
