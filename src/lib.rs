//! # turnbase
//!
//! A pick-resolution engine for turn-based multiplayer games.
//!
//! Actions are declared as ordered sequences of *picks* (choices,
//! elements, numbers, free text). The engine enumerates candidates,
//! validates selections against designer-supplied disabled rules, and
//! answers reachability questions so a UI never offers an action the
//! player cannot finish.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded actions or element kinds.
//!    Games declare their rules at startup via `GameDefinition`.
//!
//! 2. **N-Player First**: Every API takes a `PlayerId` in context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Disabled, Not Hidden**: Invalid candidates are enumerated with
//!    a designer-written reason so interfaces can explain themselves.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`,
//!    so search and speculative validation never pay for copies.
//!
//! - **Disabled-First Validation**: A disabled candidate's reason
//!    always wins over shape errors, so the message a player sees is
//!    the one the designer wrote.
//!
//! - **Reachability Before Offering**: `has_valid_selection_path`
//!    proves an action can be completed before it is shown at all.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, state, RNG
//! - `action`: Pick and action declarations, argument values
//! - `resolve`: Candidate enumeration, validation, reachability, repeats
//! - `rules`: Game definition, availability query, action execution
//! - `ai`: Enabled-only projections for agents and samplers
//! - `games`: Example games built on the engine

pub mod action;
pub mod ai;
pub mod core;
pub mod error;
pub mod games;
pub mod resolve;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{EntityId, GameElement, GameRng, GameState, PlayerId, PlayerMap};

pub use crate::action::{
    ActionBuilder, ActionDeclaration, PartialArgs, PickArg, PickContext, PickDeclaration,
    PickKind, PickValue,
};

pub use crate::resolve::{
    choices, has_valid_selection_path, selection_path, validate_selection, validate_value,
    AnnotatedCandidate, Exploration, PathResult, RepeatState, RepeatingPick,
};

pub use crate::rules::{execute_action, validate_args, GameDefinition};

pub use crate::ai::{legal_completions, legal_values, sample_value};

pub use crate::error::PickError;
