//! Stable identifiers for game elements.
//!
//! Every object in the game's live object graph (a card, a token, a board
//! space) is a *element* stored in an arena on [`GameState`](super::GameState)
//! and addressed by an `EntityId`. Element picks carry these IDs rather than
//! references, so equality checks are integer comparisons and IDs survive
//! serialization to the session layer unchanged.
//!
//! ## Usage
//!
//! ```
//! use turnbase::core::EntityId;
//!
//! let card = EntityId(7);
//! assert_eq!(card.raw(), 7);
//! assert_eq!(format!("{}", card), "Element(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game element.
///
/// IDs are allocated by [`GameState::spawn`](super::GameState::spawn) and
/// are stable for the life of the game. They are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.0)
    }
}
