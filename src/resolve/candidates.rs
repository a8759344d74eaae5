//! Candidate enumeration: the live, annotated choice list for one pick.
//!
//! `choices` is the single source of truth for what a pick currently
//! offers. Disabled candidates are **included**, never filtered out: a UI
//! must be able to render a disabled option grayed-out with its reason,
//! which requires it to appear in the list. Callers that need only the
//! enabled set filter for themselves (the reachability checker and the AI
//! adapter both do).
//!
//! Annotations are derived, never stored: the list is recomputed from live
//! state on every call and must not outlive the resolution round it was
//! computed for.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::action::{PartialArgs, PickContext, PickDeclaration, PickValue};

/// One candidate paired with its current disabled status.
///
/// Serializes as the `{ value, disabled }` pair the session layer sends
/// per pick; `disabled` is `null` when the candidate is enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCandidate {
    /// The raw candidate value.
    pub value: PickValue,
    /// `None` if enabled, otherwise the human-readable reason.
    pub disabled: Option<String>,
}

impl AnnotatedCandidate {
    /// Whether the candidate is currently selectable.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.disabled.is_none()
    }
}

/// Enumerate the annotated candidates for a pick.
///
/// `args` holds the values resolved for earlier picks in the same action
/// attempt; candidate and disabled evaluators may depend on them. Pure
/// against game state: calling twice with identical inputs yields
/// structurally identical (freshly allocated) output unless state mutated
/// between calls.
///
/// Text picks have no enumerable candidates and return an empty list;
/// they are validated by their text rule instead.
#[must_use]
pub fn choices(
    pick: &PickDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
) -> Vec<AnnotatedCandidate> {
    let annotated: Vec<AnnotatedCandidate> = pick
        .raw_candidates(args, ctx)
        .into_iter()
        .map(|value| {
            let disabled = pick.disabled_reason(&value, args, ctx);
            AnnotatedCandidate { value, disabled }
        })
        .collect();

    trace!(
        pick = pick.name(),
        total = annotated.len(),
        enabled = annotated.iter().filter(|c| c.enabled()).count(),
        "enumerated candidates"
    );

    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::PickValue;
    use crate::core::{GameState, PlayerId};

    fn banned_red() -> PickDeclaration {
        PickDeclaration::choose_from("color", ["Red", "Green", "Blue"]).with_disabled(
            |value, _, _| (value.as_str() == Some("Red")).then(|| "Red is banned".to_string()),
        )
    }

    #[test]
    fn test_disabled_candidates_are_included() {
        let state = GameState::new(2, 42);
        let ctx = PickContext::new(&state, PlayerId::new(0));

        let candidates = choices(&banned_red(), &PartialArgs::new(), &ctx);

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].disabled, Some("Red is banned".to_string()));
        assert!(!candidates[0].enabled());
        assert!(candidates[1].enabled());
        assert!(candidates[2].enabled());
    }

    #[test]
    fn test_no_disabled_evaluator_means_all_enabled() {
        let state = GameState::new(2, 42);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let pick = PickDeclaration::choose_from("color", ["Red", "Green"]);

        let candidates = choices(&pick, &PartialArgs::new(), &ctx);
        assert!(candidates.iter().all(AnnotatedCandidate::enabled));
    }

    #[test]
    fn test_annotation_depends_on_partial_args() {
        let state = GameState::new(2, 42);
        let ctx = PickContext::new(&state, PlayerId::new(0));

        // Second pick may not repeat the first pick's color.
        let pick = PickDeclaration::choose_from("second", ["Red", "Green"]).with_disabled(
            |value, args, _| {
                (args.value("first") == Some(value)).then(|| "Already picked".to_string())
            },
        );

        let mut args = PartialArgs::new();
        args.insert("first", PickValue::choice("Green"));

        let candidates = choices(&pick, &args, &ctx);
        assert!(candidates[0].enabled());
        assert_eq!(candidates[1].disabled, Some("Already picked".to_string()));
    }

    #[test]
    fn test_text_pick_has_no_candidates() {
        let state = GameState::new(2, 42);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let pick = PickDeclaration::text("nickname");

        assert!(choices(&pick, &PartialArgs::new(), &ctx).is_empty());
    }

    #[test]
    fn test_reenumeration_reflects_state_change() {
        let mut state = GameState::new(2, 42);
        let card = state.spawn("card", "Ace");
        state.element_mut(card).unwrap().set_attr("cost", 5);

        let pick = PickDeclaration::element("card", |_, ctx| ctx.state.elements_of_kind("card"))
            .with_disabled(|value, _, ctx| {
                let id = value.as_element()?;
                let cost = ctx.state.element(id)?.attr("cost", 0);
                let coins = ctx.state.player_state(ctx.player, "coins", 0);
                (cost > coins).then(|| "Cannot afford".to_string())
            });

        let args = PartialArgs::new();
        let before = choices(&pick, &args, &PickContext::new(&state, PlayerId::new(0)));
        assert!(!before[0].enabled());

        state.set_player_state(PlayerId::new(0), "coins", 10);
        let after = choices(&pick, &args, &PickContext::new(&state, PlayerId::new(0)));
        assert!(after[0].enabled());
    }

    #[test]
    fn test_wire_shape() {
        let state = GameState::new(2, 42);
        let ctx = PickContext::new(&state, PlayerId::new(0));
        let candidates = choices(&banned_red(), &PartialArgs::new(), &ctx);

        let json = serde_json::to_value(&candidates[1]).unwrap();
        assert_eq!(json["disabled"], serde_json::Value::Null);
        let back: AnnotatedCandidate = serde_json::from_value(json).unwrap();
        assert_eq!(back, candidates[1]);
    }
}
