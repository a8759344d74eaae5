//! Game definitions and the action executor.
//!
//! - `GameDefinition`: the registry of action declarations, plus the
//!   "which actions are offerable" availability query
//! - `executor`: the final validation gate before an effect runs

pub mod definition;
pub mod executor;

pub use definition::GameDefinition;
pub use executor::{execute_action, validate_args};
