//! Selection validation: accept or reject a submitted value.
//!
//! The one ordering rule that matters: **disabled is checked first**. If
//! the submitted value matches a candidate at all, the candidate's
//! disabled reason wins over every other rejection path, so a designer's
//! custom reason ("Red is banned this round") always reaches the caller
//! verbatim instead of being swallowed by a generic "invalid" message.

use tracing::debug;

use crate::action::{PartialArgs, PickArg, PickContext, PickDeclaration, PickKind, PickValue};
use crate::error::PickError;

use super::candidates::{choices, AnnotatedCandidate};

/// Validate one submitted value against the annotated candidate list.
///
/// The per-item rule shared by single- and multi-value picks:
/// - value matches a disabled candidate → [`PickError::SelectionDisabled`]
///   with the designer's reason verbatim,
/// - value matches no candidate → [`PickError::NotAValidChoice`],
/// - otherwise accepted.
pub fn validate_value(
    pick: &PickDeclaration,
    value: &PickValue,
    candidates: &[AnnotatedCandidate],
) -> Result<(), PickError> {
    match candidates.iter().find(|c| c.value == *value) {
        Some(candidate) => match &candidate.disabled {
            Some(reason) => {
                debug!(pick = pick.name(), %value, reason, "rejecting disabled selection");
                Err(PickError::SelectionDisabled {
                    pick: pick.name().to_string(),
                    reason: reason.clone(),
                })
            }
            None => Ok(()),
        },
        None => {
            debug!(pick = pick.name(), %value, "rejecting unknown selection");
            Err(PickError::NotAValidChoice {
                pick: pick.name().to_string(),
            })
        }
    }
}

/// Validate a full submission (single value or value list) for one pick.
///
/// Multi-value submissions are atomic: the whole submission is rejected if
/// any single item fails, citing that item's specific reason. Items are
/// checked in order against candidates re-enumerated with the preceding
/// items folded into the enumeration args (the passed `candidates` list is
/// not consulted for multi-value picks), so accumulation-dependent
/// disabled rules behave as they do round by round.
/// Cardinality is checked after per-item validation so a disabled reason
/// is never masked by a count problem. Duplicate values in one submission
/// are rejected; a candidate can be taken at most once.
///
/// Text picks carry no candidates and are validated by their text rule;
/// a rule rejection surfaces as [`PickError::SelectionDisabled`] so the
/// designer's reason reaches the player unchanged.
pub fn validate_selection(
    pick: &PickDeclaration,
    submitted: &PickArg,
    candidates: &[AnnotatedCandidate],
    args: &PartialArgs,
    ctx: &PickContext,
) -> Result<(), PickError> {
    let not_valid = || PickError::NotAValidChoice {
        pick: pick.name().to_string(),
    };

    match pick.kind() {
        PickKind::Text => {
            let PickArg::One(PickValue::Text(text)) = submitted else {
                return Err(not_valid());
            };
            match pick.text_rejection(text, args, ctx) {
                Some(reason) => Err(PickError::SelectionDisabled {
                    pick: pick.name().to_string(),
                    reason,
                }),
                None => Ok(()),
            }
        }

        PickKind::Elements { min, max } => {
            let PickArg::Many(values) = submitted else {
                return Err(not_valid());
            };

            // Each item is validated against candidates re-enumerated with
            // the accepted prefix folded under the pick's own name, exactly
            // what round-by-round resolution would have seen: disabled
            // rules may depend on the accumulation so far.
            for (i, value) in values.iter().enumerate() {
                if values[..i].contains(value) {
                    debug!(pick = pick.name(), %value, "rejecting duplicate selection");
                    return Err(not_valid());
                }
                let mut scoped = args.clone();
                scoped.insert_many(pick.name(), values[..i].iter().cloned());
                let round = choices(pick, &scoped, ctx);
                validate_value(pick, value, &round)?;
            }

            if values.len() < min || values.len() > max {
                return Err(PickError::CardinalityViolation {
                    pick: pick.name().to_string(),
                    min,
                    max,
                    actual: values.len(),
                });
            }

            Ok(())
        }

        PickKind::Choice | PickKind::Element | PickKind::Number { .. } => {
            let PickArg::One(value) = submitted else {
                return Err(not_valid());
            };
            validate_value(pick, value, candidates)
        }
    }
}
