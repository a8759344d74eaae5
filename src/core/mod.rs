//! Core engine types: element arena, players, state, RNG.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games build on these via action declarations rather
//! than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameElement, GameState};
