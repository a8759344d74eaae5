//! Search-facing consumers of the resolution engine.
//!
//! A deliberately thin layer: search agents get bare enabled values
//! (and nothing about why the rest were illegal) so the search remains
//! decoupled from game rules.

pub mod adapter;

pub use adapter::{legal_completions, legal_values, sample_value};
