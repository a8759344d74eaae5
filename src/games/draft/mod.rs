//! Card-draft game for testing the engine.
//!
//! A minimal game that exercises every pick kind:
//! - A shared market of face-up cards with a coin cost
//! - "take": an element pick that is enumerated but disabled when a
//!   card is too expensive
//! - "scrap": a variable-cardinality pick of 1-2 owned cards
//! - "bid": a bounded number pick gated by the player's coins
//! - "pass": an action with no picks at all
//!
//! Supports 2-8 players to verify N-player generality.

mod game;

pub use game::DraftGameBuilder;
