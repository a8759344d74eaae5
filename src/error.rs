//! Error taxonomy for pick resolution.
//!
//! A malformed or temporarily-impossible player request is a routine
//! occurrence (players probe the UI, AI explores illegal-looking branches),
//! so every kind here is an ordinary `Result` value. Bugs in
//! designer-supplied evaluators are trusted-code failures and are not
//! caught; they panic through to the game's error boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a submitted selection or action request was rejected.
///
/// All variants are recoverable: callers re-prompt (or, for
/// [`PickError::CardinalityViolation`], restart the repeating pick from
/// empty accumulation).
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PickError {
    /// Submitted value matched no candidate at all.
    ///
    /// A generic "something went stale, please retry" rejection; the
    /// caller should re-enumerate and re-prompt.
    #[error("'{pick}': not a valid choice")]
    NotAValidChoice {
        /// Name of the pick that rejected the value.
        pick: String,
    },

    /// Submitted value matched a candidate that is currently disabled.
    ///
    /// `reason` is the designer-authored string verbatim, suitable for
    /// direct display to the player.
    #[error("Selection disabled: {reason}")]
    SelectionDisabled {
        /// Name of the pick that rejected the value.
        pick: String,
        /// The designer-authored reason, unmodified.
        reason: String,
    },

    /// A repeating pick's final accumulated count fell outside `[min, max]`.
    #[error("'{pick}': expected between {min} and {max} values, got {actual}")]
    CardinalityViolation {
        /// Name of the repeating pick.
        pick: String,
        /// Minimum accepted count.
        min: usize,
        /// Maximum accepted count.
        max: usize,
        /// Count actually accumulated.
        actual: usize,
    },

    /// The action has no valid completion path and is not offerable.
    #[error("action '{action}' has no valid completion")]
    UnreachableAction {
        /// Name of the action.
        action: String,
    },

    /// A required pick was absent from the submitted argument set.
    #[error("'{pick}': missing required value")]
    MissingArgument {
        /// Name of the missing pick.
        pick: String,
    },

    /// No action declaration with this name exists.
    #[error("unknown action '{action}'")]
    UnknownAction {
        /// The requested action name.
        action: String,
    },
}

impl PickError {
    /// The designer-authored disabled reason, if this is a
    /// [`PickError::SelectionDisabled`].
    #[must_use]
    pub fn disabled_reason(&self) -> Option<&str> {
        match self {
            Self::SelectionDisabled { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
