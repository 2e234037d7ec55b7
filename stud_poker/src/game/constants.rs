//! Betting limits, timing, and table bounds for limit five-card stud.

/// Forced contribution by every eligible seat at the start of a hand.
pub const ANTE: u32 = 1;

/// Mandatory opening bet posted by the worst visible up-card in round 1.
pub const BRING_IN: u32 = 2;

/// The low bet/raise increment (rounds 1 and 2).
pub const LOW: u32 = 5;

/// The high bet increment (rounds 3 and 4).
pub const HIGH: u32 = 10;

/// Chips handed to every seat when it joins a table.
pub const STARTING_PURSE: u32 = 200;

/// Seats per table.
pub const MAX_SEATS: usize = 8;

/// Betting rounds per hand. Round 5 is the showdown hold.
pub const LAST_BETTING_ROUND: u8 = 4;

pub const BOT_TURN_SECS: i64 = 1;
pub const HUMAN_TURN_SECS: i64 = 30;
pub const SHOWDOWN_HOLD_SECS: i64 = 7;

/// Seats that have not been seen for this long are evicted between hands.
pub const IDLE_EVICT_SECS: i64 = 5 * 60;

/// Upper bound on forced moves absorbed by a single step, so an all-bot
/// table with an expired clock cannot starve the worker.
pub const MAX_FORCED_MOVES: usize = 32;

/// Table name used when a request does not specify one.
pub const DEFAULT_TABLE: &str = "default";

pub const WAITING_MESSAGE: &str = "Waiting for more players";

/// Roster the server draws bot seats from, in join order.
pub const BOT_NAMES: [&str; MAX_SEATS] = ["Clyde", "Spock", "Kirk", "Hulk", "Fry", "Meg", "GI", "AI"];
