//! Repeating pick processor: variable-cardinality picks, one value per round.
//!
//! Drives a pick like "choose between 1 and 4 cards". Each round the
//! caller asks for candidates (freshly enumerated against everything
//! accepted so far), submits one value, and the processor validates it,
//! folds it in, and decides whether another round is offered.
//!
//! Three states: `AwaitingValue` (initial and recurring), `Accepted`
//! (terminal success), `Rejected` (terminal failure). On any rejection the
//! entire accumulation is discarded, not partially kept - accepting some
//! values while silently dropping a bad one would corrupt the "exactly
//! what the player agreed to" invariant. Callers restart from empty.
//!
//! Rounds are strictly sequential: round *n+1* never begins before round
//! *n*'s fold completes.

use smallvec::SmallVec;
use tracing::debug;

use crate::action::{PartialArgs, PickContext, PickDeclaration, PickValue};
use crate::error::PickError;

use super::candidates::{choices, AnnotatedCandidate};
use super::validate::validate_value;

/// Where a repeating pick currently stands.
#[derive(Clone, Debug, PartialEq)]
pub enum RepeatState {
    /// Ready for (another) value.
    AwaitingValue,
    /// Terminal: cardinality and continuation rules satisfied.
    Accepted,
    /// Terminal: a submission failed, accumulation discarded.
    Rejected(PickError),
}

/// Drives one variable-cardinality pick to completion.
///
/// ```
/// use turnbase::action::{PartialArgs, PickContext, PickDeclaration, PickValue};
/// use turnbase::core::{GameState, PlayerId};
/// use turnbase::resolve::{RepeatState, RepeatingPick};
///
/// let mut state = GameState::new(2, 42);
/// let a = state.spawn("card", "a");
/// let b = state.spawn("card", "b");
/// let pick = PickDeclaration::elements("cards", 1, 2, |_, ctx| {
///     ctx.state.elements_of_kind("card")
/// });
///
/// let args = PartialArgs::new();
/// let ctx = PickContext::new(&state, PlayerId::new(0));
/// let mut repeating = RepeatingPick::new(&pick);
///
/// repeating.submit(PickValue::Element(a), &args, &ctx).unwrap();
/// repeating.submit(PickValue::Element(b), &args, &ctx).unwrap();
/// assert_eq!(*repeating.state(), RepeatState::Accepted);
/// assert_eq!(repeating.finish().unwrap().len(), 2);
/// ```
pub struct RepeatingPick<'a> {
    pick: &'a PickDeclaration,
    min: usize,
    max: usize,
    accumulated: SmallVec<[PickValue; 4]>,
    state: RepeatState,
}

impl<'a> RepeatingPick<'a> {
    /// Start a repeating pick from empty accumulation.
    ///
    /// Panics if the pick has no cardinality bounds; only `elements`
    /// picks repeat.
    #[must_use]
    pub fn new(pick: &'a PickDeclaration) -> Self {
        let (min, max) = pick
            .kind()
            .cardinality()
            .expect("repeating pick requires cardinality bounds");
        Self {
            pick,
            min,
            max,
            accumulated: SmallVec::new(),
            state: RepeatState::AwaitingValue,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &RepeatState {
        &self.state
    }

    /// Values accepted so far, in acceptance order.
    #[must_use]
    pub fn accumulated(&self) -> &[PickValue] {
        &self.accumulated
    }

    /// The candidates for the next round.
    ///
    /// Enumerated with the accumulation folded in under the pick's own
    /// name, so disabled evaluators can react to what is already picked
    /// (e.g. "can't pick the same suit twice"). Re-evaluated every round.
    #[must_use]
    pub fn candidates(&self, args: &PartialArgs, ctx: &PickContext) -> Vec<AnnotatedCandidate> {
        let scoped = self.scoped_args(args);
        choices(self.pick, &scoped, ctx)
    }

    /// Submit one value for the current round.
    ///
    /// On success the value is folded into the accumulation and the state
    /// becomes either `AwaitingValue` (another round requested) or
    /// `Accepted`. On failure the state becomes `Rejected`, the entire
    /// accumulation is discarded, and the error is returned.
    pub fn submit(
        &mut self,
        value: PickValue,
        args: &PartialArgs,
        ctx: &PickContext,
    ) -> Result<&RepeatState, PickError> {
        if self.state != RepeatState::AwaitingValue {
            return Err(PickError::NotAValidChoice {
                pick: self.pick.name().to_string(),
            });
        }

        let scoped = self.scoped_args(args);
        let candidates = choices(self.pick, &scoped, ctx);

        let result = if self.accumulated.contains(&value) {
            Err(PickError::NotAValidChoice {
                pick: self.pick.name().to_string(),
            })
        } else {
            validate_value(self.pick, &value, &candidates)
        };

        if let Err(err) = result {
            debug!(pick = self.pick.name(), %value, "repeating pick rejected");
            self.accumulated.clear();
            self.state = RepeatState::Rejected(err.clone());
            return Err(err);
        }

        self.accumulated.push(value);

        if self.accumulated.len() >= self.max {
            self.state = RepeatState::Accepted;
        } else {
            let scoped = self.scoped_args(args);
            if !self.pick.continue_requested(&self.accumulated, &scoped, ctx) {
                self.state = self.close();
            }
        }

        Ok(&self.state)
    }

    /// The player signals completion without filling every round.
    ///
    /// Accepts if the accumulated count is within `[min, max]`, returning
    /// the values; otherwise rejects with
    /// [`PickError::CardinalityViolation`] and discards the accumulation.
    pub fn finish(&mut self) -> Result<Vec<PickValue>, PickError> {
        match &self.state {
            RepeatState::Rejected(err) => Err(err.clone()),
            RepeatState::Accepted => Ok(self.accumulated.drain(..).collect()),
            RepeatState::AwaitingValue => {
                self.state = self.close();
                match &self.state {
                    RepeatState::Accepted => Ok(self.accumulated.drain(..).collect()),
                    RepeatState::Rejected(err) => Err(err.clone()),
                    RepeatState::AwaitingValue => unreachable!("close() is terminal"),
                }
            }
        }
    }

    /// Discard everything and return to empty accumulation.
    pub fn reset(&mut self) {
        self.accumulated.clear();
        self.state = RepeatState::AwaitingValue;
    }

    /// Terminal state for the current accumulation count.
    fn close(&mut self) -> RepeatState {
        if (self.min..=self.max).contains(&self.accumulated.len()) {
            RepeatState::Accepted
        } else {
            let err = PickError::CardinalityViolation {
                pick: self.pick.name().to_string(),
                min: self.min,
                max: self.max,
                actual: self.accumulated.len(),
            };
            self.accumulated.clear();
            RepeatState::Rejected(err)
        }
    }

    fn scoped_args(&self, args: &PartialArgs) -> PartialArgs {
        let mut scoped = args.clone();
        scoped.insert_many(self.pick.name(), self.accumulated.iter().cloned());
        scoped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, GameState, PlayerId};

    fn cards_state(n: usize) -> (GameState, Vec<EntityId>) {
        let mut state = GameState::new(2, 42);
        let ids = (0..n).map(|i| state.spawn("card", format!("c{i}"))).collect();
        (state, ids)
    }

    fn card_pick(min: usize, max: usize) -> PickDeclaration {
        PickDeclaration::elements("cards", min, max, |_, ctx| {
            ctx.state.elements_of_kind("card")
        })
    }

    #[test]
    fn test_accepts_at_max() {
        let (state, ids) = cards_state(3);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = card_pick(1, 2);
        let mut repeating = RepeatingPick::new(&pick);

        assert_eq!(
            repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap(),
            &RepeatState::AwaitingValue
        );
        assert_eq!(
            repeating.submit(PickValue::Element(ids[1]), &args, &ctx).unwrap(),
            &RepeatState::Accepted
        );

        let values = repeating.finish().unwrap();
        assert_eq!(values, vec![PickValue::Element(ids[0]), PickValue::Element(ids[1])]);
    }

    #[test]
    fn test_continue_evaluator_stops_early() {
        // min=1, max=3, but the continue evaluator stops after 2.
        let (state, ids) = cards_state(3);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = PickDeclaration::elements("cards", 1, 3, |_, ctx| {
            ctx.state.elements_of_kind("card")
        })
        .with_continue(|acc, _, _| acc.len() < 2);
        let mut repeating = RepeatingPick::new(&pick);

        repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap();
        let state_after = repeating.submit(PickValue::Element(ids[1]), &args, &ctx).unwrap();

        // Accepted with exactly 2 values; a third round is never offered.
        assert_eq!(state_after, &RepeatState::Accepted);
        assert!(repeating
            .submit(PickValue::Element(ids[2]), &args, &ctx)
            .is_err());
    }

    #[test]
    fn test_finish_below_min_is_cardinality_violation() {
        let (state, ids) = cards_state(3);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = card_pick(2, 3);
        let mut repeating = RepeatingPick::new(&pick);

        repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap();

        let err = repeating.finish().unwrap_err();
        assert_eq!(
            err,
            PickError::CardinalityViolation {
                pick: "cards".to_string(),
                min: 2,
                max: 3,
                actual: 1,
            }
        );
        assert!(repeating.accumulated().is_empty());
    }

    #[test]
    fn test_rejection_discards_accumulation() {
        let (state, ids) = cards_state(2);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = card_pick(1, 2);
        let mut repeating = RepeatingPick::new(&pick);

        repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap();
        // Not a card in the arena.
        let err = repeating
            .submit(PickValue::Element(EntityId(99)), &args, &ctx)
            .unwrap_err();
        assert!(matches!(err, PickError::NotAValidChoice { .. }));

        assert!(repeating.accumulated().is_empty());
        assert!(matches!(repeating.state(), RepeatState::Rejected(_)));

        // Restart from empty after reset.
        repeating.reset();
        assert_eq!(*repeating.state(), RepeatState::AwaitingValue);
        repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap();
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let (state, ids) = cards_state(2);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = card_pick(1, 2);
        let mut repeating = RepeatingPick::new(&pick);

        repeating.submit(PickValue::Element(ids[0]), &args, &ctx).unwrap();
        let err = repeating
            .submit(PickValue::Element(ids[0]), &args, &ctx)
            .unwrap_err();
        assert!(matches!(err, PickError::NotAValidChoice { .. }));
    }

    #[test]
    fn test_disabled_reevaluated_against_accumulation() {
        // Can't pick the same suit twice.
        let mut state = GameState::new(2, 42);
        let h1 = state.spawn("card", "h1");
        let h2 = state.spawn("card", "h2");
        let s1 = state.spawn("card", "s1");
        state.element_mut(h1).unwrap().set_attr("suit", 1);
        state.element_mut(h2).unwrap().set_attr("suit", 1);
        state.element_mut(s1).unwrap().set_attr("suit", 2);

        let pick = PickDeclaration::elements("cards", 1, 2, |_, ctx| {
            ctx.state.elements_of_kind("card")
        })
        .with_disabled(|value, args, ctx| {
            let id = value.as_element()?;
            let suit = ctx.state.element(id)?.attr("suit", 0);
            let repeat = args.values_of("cards").iter().any(|v| {
                v.as_element()
                    .and_then(|picked| ctx.state.element(picked))
                    .is_some_and(|e| e.attr("suit", 0) == suit)
            });
            repeat.then(|| "Suit already picked".to_string())
        });

        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let mut repeating = RepeatingPick::new(&pick);

        // Round 1: everything enabled.
        assert!(repeating.candidates(&args, &ctx).iter().all(|c| c.enabled()));
        repeating.submit(PickValue::Element(h1), &args, &ctx).unwrap();

        // Round 2: the other heart is now disabled with the reason.
        let candidates = repeating.candidates(&args, &ctx);
        let h2_candidate = candidates
            .iter()
            .find(|c| c.value == PickValue::Element(h2))
            .unwrap();
        assert_eq!(h2_candidate.disabled, Some("Suit already picked".to_string()));

        let err = repeating.submit(PickValue::Element(h2), &args, &ctx).unwrap_err();
        assert_eq!(err.disabled_reason(), Some("Suit already picked"));
    }

    #[test]
    fn test_fold_matches_stepwise_validation() {
        // Accepting one value at a time equals validating the same
        // sequence against freshly-enumerated candidates at each step.
        let (state, ids) = cards_state(4);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let args = PartialArgs::new();
        let pick = card_pick(1, 3);

        let sequence = [ids[2], ids[0], ids[3]];

        let mut repeating = RepeatingPick::new(&pick);
        for id in sequence {
            repeating.submit(PickValue::Element(id), &args, &ctx).unwrap();
        }
        let folded = repeating.finish().unwrap();

        let mut manual = Vec::new();
        for id in sequence {
            let mut scoped = args.clone();
            scoped.insert_many("cards", manual.iter().cloned());
            let candidates = choices(&pick, &scoped, &ctx);
            let value = PickValue::Element(id);
            validate_value(&pick, &value, &candidates).unwrap();
            manual.push(value);
        }

        assert_eq!(folded, manual);
    }

    #[test]
    #[should_panic(expected = "repeating pick requires cardinality bounds")]
    fn test_non_repeating_pick_panics() {
        let pick = PickDeclaration::choose_from("color", ["Red"]);
        let _ = RepeatingPick::new(&pick);
    }
}
