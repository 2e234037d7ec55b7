//! Hand ranking.
//!
//! Two separate orderings live here. [`rank_key`] scores a partial hand
//! (up to four visible up-cards, or a bot's whole hand) and is used to pick
//! the first seat to act each round. [`showdown`] evaluates complete
//! five-card hands to settle the pot.

use std::cmp::Ordering;
use std::fmt;

use super::entities::{value_name, Card, Value};

/// Score a set of cards as a lexicographically comparable key. Cards are
/// grouped by value; each card contributes `100 * (5 - set_size) - value`,
/// so bigger sets and higher values sort smaller. The first half of the key
/// ignores suits; the second half repeats the scores with a suit tie-break
/// (`4 * value + suit`). Each half is padded to four entries with 999.
///
/// The smallest key is the best hand. `key[0] < 300` means at least a pair,
/// `< 200` at least two pair.
pub fn rank_key(cards: &[Card]) -> Vec<i32> {
    let mut counts = [0i32; 15];
    for card in cards {
        counts[card.0 as usize] += 1;
    }

    let mut by_value = Vec::with_capacity(cards.len());
    let mut by_suit = Vec::with_capacity(cards.len());
    for card in cards {
        let set = counts[card.0 as usize];
        let value = i32::from(card.0);
        by_value.push(100 * (5 - set) - value);
        by_suit.push(100 * (5 - set) - (4 * value + card.1.weight()));
    }

    by_value.sort_unstable();
    while by_value.len() < 4 {
        by_value.push(999);
    }
    by_suit.sort_unstable();
    by_value.extend(by_suit);
    while by_value.len() < 8 {
        by_value.push(999);
    }
    by_value
}

/// Five-card hand classes, worst to best.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// Evaluated hand: the class plus tie-break values in descending
/// significance. Orders naturally, best hand greatest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandValue {
    pub rank: Rank,
    pub values: Vec<Value>,
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lead = self.values.first().copied().unwrap_or(2);
        match self.rank {
            Rank::HighCard => write!(f, "{} High", singular(lead)),
            Rank::OnePair => write!(f, "Pair of {}", value_name(lead)),
            Rank::TwoPair => {
                let low = self.values.get(1).copied().unwrap_or(2);
                write!(f, "Two Pair, {} and {}", value_name(lead), value_name(low))
            }
            Rank::ThreeOfAKind => write!(f, "Three of a Kind, {}", value_name(lead)),
            Rank::Straight => write!(f, "Straight to the {}", singular(lead)),
            Rank::Flush => write!(f, "Flush, {} High", singular(lead)),
            Rank::FullHouse => {
                let low = self.values.get(1).copied().unwrap_or(2);
                write!(f, "Full House, {} over {}", value_name(lead), value_name(low))
            }
            Rank::FourOfAKind => write!(f, "Four of a Kind, {}", value_name(lead)),
            Rank::StraightFlush => write!(f, "Straight Flush to the {}", singular(lead)),
        }
    }
}

fn singular(value: Value) -> &'static str {
    match value {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => "Ace",
    }
}

/// Evaluate a complete hand. Handles short hands (fewer than five cards)
/// by classifying on sets alone, which is enough for defaulted showdowns.
pub fn eval_five(cards: &[Card]) -> HandValue {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.0 as usize] += 1;
    }

    // Groups sorted by set size, then value, both descending.
    let mut groups: Vec<(u8, Value)> = (2..=14)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    if groups.is_empty() {
        return HandValue {
            rank: Rank::HighCard,
            values: Vec::new(),
        };
    }

    let is_flush = cards.len() == 5 && cards.iter().all(|c| c.1 == cards[0].1);
    let straight_high = straight_high_card(&groups);

    match (straight_high, is_flush) {
        (Some(high), true) => {
            return HandValue {
                rank: Rank::StraightFlush,
                values: vec![high],
            }
        }
        (Some(high), false) => {
            if groups.len() == 5 {
                return HandValue {
                    rank: Rank::Straight,
                    values: vec![high],
                };
            }
        }
        (None, true) => {
            let mut values: Vec<Value> = cards.iter().map(|c| c.0).collect();
            values.sort_unstable_by(|a, b| b.cmp(a));
            return HandValue {
                rank: Rank::Flush,
                values,
            };
        }
        (None, false) => {}
    }

    let values: Vec<Value> = groups.iter().map(|&(_, v)| v).collect();
    let rank = match (groups[0].0, groups.get(1).map(|g| g.0).unwrap_or(0)) {
        (4, _) => Rank::FourOfAKind,
        (3, 2) => Rank::FullHouse,
        (3, _) => Rank::ThreeOfAKind,
        (2, 2) => Rank::TwoPair,
        (2, _) => Rank::OnePair,
        _ => Rank::HighCard,
    };
    HandValue { rank, values }
}

/// High card of a five-card straight, if the grouped values form one.
/// The wheel (A-2-3-4-5) plays as a straight to the five.
fn straight_high_card(groups: &[(u8, Value)]) -> Option<Value> {
    if groups.len() != 5 {
        return None;
    }
    let mut values: Vec<Value> = groups.iter().map(|&(_, v)| v).collect();
    values.sort_unstable();
    if values == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    if values.windows(2).all(|w| w[1] == w[0] + 1) {
        return Some(values[4]);
    }
    None
}

/// Order pockets best-first. Returns the permutation of pocket indices and
/// the count of pockets tied for best (1 in normal play, more on a split).
pub fn showdown(pockets: &[Vec<Card>]) -> (Vec<usize>, usize) {
    if pockets.is_empty() {
        return (Vec::new(), 0);
    }
    let evals: Vec<HandValue> = pockets.iter().map(|p| eval_five(p)).collect();
    let mut order: Vec<usize> = (0..pockets.len()).collect();
    order.sort_by(|&a, &b| evals[b].cmp(&evals[a]));
    let best = &evals[order[0]];
    let pivot = order.iter().take_while(|&&i| evals[i] == *best).count();
    (order, pivot)
}
