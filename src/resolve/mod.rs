//! The pick resolution engine.
//!
//! Four cooperating pieces, all pure against game state:
//! - `candidates`: enumerate a pick's annotated candidate list
//! - `validate`: accept/reject a submitted value, disabled-first
//! - `reachability`: can the action still be completed from here?
//! - `repeating`: drive a variable-cardinality pick round by round
//!
//! Everything here is synchronous and non-blocking; a single resolution
//! call never suspends and never mutates `GameState`. Candidate lists and
//! partial arguments are ephemeral - recompute after any state change.

pub mod candidates;
pub mod reachability;
pub mod repeating;
pub mod validate;

pub use candidates::{choices, AnnotatedCandidate};
pub use reachability::{has_valid_selection_path, selection_path, Exploration, PathResult};
pub use repeating::{RepeatState, RepeatingPick};
pub use validate::{validate_selection, validate_value};
