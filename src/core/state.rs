//! Live game state: the element arena and per-player state.
//!
//! ## GameElement
//!
//! Every object in the game (card, token, space) is a `GameElement` with a
//! stable [`EntityId`], a kind string, an optional owner, and an `i64`
//! attribute map. Element picks refer to elements by ID only.
//!
//! ## GameState
//!
//! The arena plus per-player state and a deterministic RNG. The pick
//! resolution engine treats `GameState` as read-only; only a completed
//! action's effect mutates it.
//!
//! ## State Values (i64 only)
//!
//! Attribute and player-state maps use `i64` values:
//! - Booleans: use 0/1
//! - Element references: use `EntityId.0 as i64`
//! - Enums: use discriminant values

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;

/// One object in the game's live object graph.
///
/// Elements are compared by [`EntityId`], never by contents: two elements
/// with identical attributes are still distinct picks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameElement {
    /// Stable arena handle.
    pub id: EntityId,

    /// Game-defined kind (e.g. "card", "space"). Opaque to the engine.
    pub kind: String,

    /// Human-readable name (for display/debugging).
    pub name: String,

    /// Owning player, `None` for shared elements.
    pub owner: Option<PlayerId>,

    /// Game-defined attributes.
    attrs: FxHashMap<String, i64>,
}

impl GameElement {
    fn new(id: EntityId, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: name.into(),
            owner: None,
            attrs: FxHashMap::default(),
        }
    }

    /// Get an attribute value with default.
    #[must_use]
    pub fn attr(&self, key: &str, default: i64) -> i64 {
        self.attrs.get(key).copied().unwrap_or(default)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: i64) {
        self.attrs.insert(key.into(), value);
    }

    /// Modify an attribute value by delta.
    pub fn modify_attr(&mut self, key: &str, delta: i64) {
        let current = self.attr(key, 0);
        self.attrs.insert(key.to_string(), current + delta);
    }
}

/// Complete game state.
///
/// Uses `im` persistent maps for the arena so AI search can clone states
/// in O(1) and diverge cheaply.
pub struct GameState {
    player_count: usize,

    /// Player whose turn it is.
    pub current_player: PlayerId,

    /// Per-player state (score, resources, ...) - games define keys.
    player_state: PlayerMap<FxHashMap<String, i64>>,

    /// Element arena.
    elements: ImHashMap<EntityId, GameElement>,

    /// Insertion order, so candidate enumeration is deterministic.
    order: Vector<EntityId>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Next entity ID to allocate. IDs are never reused.
    next_entity_id: u32,
}

impl GameState {
    /// Create a new game state.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            current_player: PlayerId::new(0),
            player_state: PlayerMap::with_default(player_count),
            elements: ImHashMap::new(),
            order: Vector::new(),
            rng: GameRng::new(seed),
            next_entity_id: 0,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    // === Elements ===

    /// Create a new element and return its ID.
    pub fn spawn(&mut self, kind: impl Into<String>, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.elements.insert(id, GameElement::new(id, kind, name));
        self.order.push_back(id);
        id
    }

    /// Create a new element owned by a player.
    pub fn spawn_owned(
        &mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        owner: PlayerId,
    ) -> EntityId {
        let id = self.spawn(kind, name);
        if let Some(element) = self.elements.get_mut(&id) {
            element.owner = Some(owner);
        }
        id
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: EntityId) -> Option<&GameElement> {
        self.elements.get(&id)
    }

    /// Get a mutable element by ID.
    pub fn element_mut(&mut self, id: EntityId) -> Option<&mut GameElement> {
        self.elements.get_mut(&id)
    }

    /// Remove an element from the arena.
    ///
    /// Returns true if the element existed. Its ID is never reallocated.
    pub fn remove_element(&mut self, id: EntityId) -> bool {
        if self.elements.remove(&id).is_some() {
            if let Some(pos) = self.order.iter().position(|&e| e == id) {
                self.order.remove(pos);
            }
            true
        } else {
            false
        }
    }

    /// Number of elements in the arena.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Iterate over all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &GameElement> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// IDs of all elements of a given kind, in insertion order.
    #[must_use]
    pub fn elements_of_kind(&self, kind: &str) -> Vec<EntityId> {
        self.elements_where(|e| e.kind == kind)
    }

    /// IDs of all elements matching a predicate, in insertion order.
    #[must_use]
    pub fn elements_where(&self, pred: impl Fn(&GameElement) -> bool) -> Vec<EntityId> {
        self.elements().filter(|e| pred(e)).map(|e| e.id).collect()
    }

    // === Player State ===

    /// Get a player state value with default.
    #[must_use]
    pub fn player_state(&self, player: PlayerId, key: &str, default: i64) -> i64 {
        self.player_state[player].get(key).copied().unwrap_or(default)
    }

    /// Set a player state value.
    pub fn set_player_state(&mut self, player: PlayerId, key: impl Into<String>, value: i64) {
        self.player_state[player].insert(key.into(), value);
    }

    /// Modify a player state value by delta.
    pub fn modify_player_state(&mut self, player: PlayerId, key: &str, delta: i64) {
        let current = self.player_state(player, key, 0);
        self.player_state[player].insert(key.to_string(), current + delta);
    }

    // === Cloning ===

    /// Clone the game state (for AI search).
    ///
    /// The arena shares structure via persistent maps. Takes `&mut self`
    /// because forking the RNG advances the fork counter.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        Self {
            player_count: self.player_count,
            current_player: self.current_player,
            player_state: self.player_state.clone(),
            elements: self.elements.clone(),
            order: self.order.clone(),
            rng: self.rng.fork(),
            next_entity_id: self.next_entity_id,
        }
    }
}
