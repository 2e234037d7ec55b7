//! Core table entities: cards, the deck, seats, and move codes.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

use super::constants::STARTING_PURSE;

/// Card suits, declared in ascending tie-break order. Spades outrank
/// hearts when two up-cards share a value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    /// Numeric tie-break weight (club lowest, spade highest).
    pub fn weight(self) -> i32 {
        match self {
            Self::Club => 0,
            Self::Diamond => 1,
            Self::Heart => 2,
            Self::Spade => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "C",
            Self::Diamond => "D",
            Self::Heart => "H",
            Self::Spade => "S",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values (2..=14, ace high).
pub type Value = u8;

/// Type alias for whole chips. All bets and purses are integral.
pub type Chips = u32;

/// A card is a tuple of a value (2u8 ..= ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            10 => "T".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            14 => "A".to_string(),
            v => v.to_string(),
        };
        write!(f, "{value}{}", self.1)
    }
}

/// Spelled-out value name, used in showdown result text.
pub fn value_name(value: Value) -> &'static str {
    match value {
        2 => "Twos",
        3 => "Threes",
        4 => "Fours",
        5 => "Fives",
        6 => "Sixes",
        7 => "Sevens",
        8 => "Eights",
        9 => "Nines",
        10 => "Tens",
        11 => "Jacks",
        12 => "Queens",
        13 => "Kings",
        _ => "Aces",
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; 52],
    pub cursor: usize,
    fixed: bool,
}

impl Deck {
    /// Deal the next card and advance the cursor.
    pub fn deal(&mut self) -> Card {
        let card = self.cards[self.cursor];
        self.cursor += 1;
        card
    }

    /// Seven Fisher-Yates passes, then reset the cursor. A fixed deck
    /// keeps its ordering and only resets the cursor.
    pub fn shuffle(&mut self, rng: &mut ChaCha20Rng) {
        if !self.fixed {
            for _ in 0..7 {
                self.cards.shuffle(rng);
            }
        }
        self.cursor = 0;
    }

    #[doc(hidden)]
    pub fn fixed(cards: [Card; 52]) -> Self {
        Self {
            cards,
            cursor: 0,
            fixed: true,
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card(2, Suit::Club); 52];
        for (i, value) in (2..=14).enumerate() {
            for (j, suit) in [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade]
                .into_iter()
                .enumerate()
            {
                cards[4 * i + j] = Card(value, suit);
            }
        }
        Self {
            cards,
            cursor: 0,
            fixed: false,
        }
    }
}

/// Where a seat stands relative to the current hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeatStatus {
    /// Seated but not anted into the current hand.
    Waiting,
    Playing,
    Folded,
    /// Gone, but retained until the hand resolves.
    Left,
}

impl SeatStatus {
    /// Wire code used by the line-oriented clients.
    pub fn code(self) -> u8 {
        match self {
            Self::Waiting => 0,
            Self::Playing => 1,
            Self::Folded => 2,
            Self::Left => 3,
        }
    }
}

/// One position at a table. Names are unique per table, compared
/// case-insensitively.
#[derive(Clone, Debug)]
pub struct Seat {
    pub name: String,
    pub status: SeatStatus,
    /// Chips committed this betting round.
    pub bet: Chips,
    /// Label of the most recent move this round ("CHECK", "RAISE", ...).
    pub last_move: String,
    pub purse: Chips,
    /// Hole card first, then up cards in deal order.
    pub cards: Vec<Card>,
    pub is_bot: bool,
    pub last_seen: DateTime<Utc>,
}

impl Seat {
    pub fn new(name: String, is_bot: bool, now: DateTime<Utc>) -> Self {
        Self {
            name,
            status: SeatStatus::Waiting,
            bet: 0,
            last_move: String::new(),
            purse: STARTING_PURSE,
            cards: Vec::new(),
            is_bot,
            last_seen: now,
        }
    }
}

/// Two-letter move codes as sent by clients.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveCode {
    Fold,
    Check,
    BringIn,
    BetLow,
    BetHigh,
    Call,
    RaiseLow,
    RaiseHigh,
}

impl MoveCode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Fold => "FO",
            Self::Check => "CH",
            Self::BringIn => "BB",
            Self::BetLow => "BL",
            Self::BetHigh => "BH",
            Self::Call => "CA",
            Self::RaiseLow => "RL",
            Self::RaiseHigh => "RH",
        }
    }

    /// Label stored on the seat once the move is performed.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fold => "FOLD",
            Self::Check => "CHECK",
            Self::BringIn => "POST",
            Self::BetLow | Self::BetHigh => "BET",
            Self::Call => "CALL",
            Self::RaiseLow | Self::RaiseHigh => "RAISE",
        }
    }
}

impl Serialize for MoveCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl fmt::Display for MoveCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown move code: {0}")]
pub struct ParseMoveCodeError(pub String);

impl FromStr for MoveCode {
    type Err = ParseMoveCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FO" => Ok(Self::Fold),
            "CH" => Ok(Self::Check),
            "BB" => Ok(Self::BringIn),
            "BL" => Ok(Self::BetLow),
            "BH" => Ok(Self::BetHigh),
            "CA" => Ok(Self::Call),
            "RL" => Ok(Self::RaiseLow),
            "RH" => Ok(Self::RaiseHigh),
            _ => Err(ParseMoveCodeError(s.to_string())),
        }
    }
}

/// An entry in the valid-move menu offered to the active seat. The menu
/// order is observable: forced moves index into it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidMove {
    #[serde(rename = "move")]
    pub code: MoveCode,
    pub name: String,
}

impl ValidMove {
    pub fn new(code: MoveCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}
