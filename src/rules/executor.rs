//! The final validation gate before an action's effect runs.
//!
//! The executor re-validates every pick in declared order against freshly
//! enumerated candidates, using exactly the values the player supplied. A
//! submitted value that turns out to be disabled is refused here even if
//! an earlier interactive round accepted it - game state may have changed
//! since. The whole action is rejected atomically: the effect runs only
//! after every pick passes.

use tracing::debug;

use crate::action::{ActionDeclaration, PartialArgs, PickArg, PickContext};
use crate::core::{GameState, PlayerId};
use crate::error::PickError;
use crate::resolve::{choices, validate_selection};

use super::definition::GameDefinition;

/// Validate a complete argument set against an action declaration.
///
/// Walks the picks in declared order, folding each validated argument
/// into the partial state the next pick's evaluators see - enumeration
/// order at the gate matches the order the player resolved the picks in.
///
/// A required pick missing from `args` is [`PickError::MissingArgument`];
/// optional picks may be omitted. Submitted keys that match no declared
/// pick are ignored.
pub fn validate_args(
    action: &ActionDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
) -> Result<(), PickError> {
    let mut seen = PartialArgs::new();

    for pick in action.picks() {
        let Some(submitted) = args.get(pick.name()) else {
            if pick.required() {
                debug!(
                    action = action.name(),
                    pick = pick.name(),
                    "missing required argument"
                );
                return Err(PickError::MissingArgument {
                    pick: pick.name().to_string(),
                });
            }
            continue;
        };

        let candidates = choices(pick, &seen, ctx);
        validate_selection(pick, submitted, &candidates, &seen, ctx)?;

        match submitted {
            PickArg::One(value) => seen.insert(pick.name(), value.clone()),
            PickArg::Many(values) => seen.insert_many(pick.name(), values.iter().cloned()),
        }
    }

    Ok(())
}

/// Validate and execute one action.
///
/// Rejects atomically: on any pick failure no effect runs and `state` is
/// untouched. On success the action's effect is the single place durable
/// state mutates.
pub fn execute_action(
    definition: &GameDefinition,
    state: &mut GameState,
    player: PlayerId,
    action_name: &str,
    args: &PartialArgs,
) -> Result<(), PickError> {
    let action = definition
        .action(action_name)
        .ok_or_else(|| PickError::UnknownAction {
            action: action_name.to_string(),
        })?;

    validate_args(action, args, &PickContext::new(state, player))?;

    action.run_effect(state, args, player);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{PickDeclaration, PickValue};

    fn spend_definition() -> GameDefinition {
        GameDefinition::new().with_action(
            ActionDeclaration::builder("spend")
                .pick(PickDeclaration::number("amount", 1, 5).with_disabled(|value, _, ctx| {
                    let coins = ctx.state.player_state(ctx.player, "coins", 0);
                    (value.as_number().unwrap_or(0) > coins)
                        .then(|| "Not enough coins".to_string())
                }))
                .pick(PickDeclaration::choose_from("memo", ["save", "splurge"]).optional())
                .effect(|state, args, player| {
                    let amount = args.value("amount").and_then(PickValue::as_number).unwrap_or(0);
                    state.modify_player_state(player, "coins", -amount);
                })
                .build(),
        )
    }

    #[test]
    fn test_execute_valid_action() {
        let defn = spend_definition();
        let mut state = GameState::new(2, 42);
        let player = PlayerId::new(0);
        state.set_player_state(player, "coins", 3);

        let mut args = PartialArgs::new();
        args.insert("amount", PickValue::Number(2));

        execute_action(&defn, &mut state, player, "spend", &args).unwrap();
        assert_eq!(state.player_state(player, "coins", 0), 1);
    }

    #[test]
    fn test_disabled_value_refused_at_the_gate() {
        let defn = spend_definition();
        let mut state = GameState::new(2, 42);
        let player = PlayerId::new(0);
        state.set_player_state(player, "coins", 3);

        let mut args = PartialArgs::new();
        args.insert("amount", PickValue::Number(5));

        let err = execute_action(&defn, &mut state, player, "spend", &args).unwrap_err();
        assert_eq!(err.disabled_reason(), Some("Not enough coins"));
        // No partial effect.
        assert_eq!(state.player_state(player, "coins", 0), 3);
    }

    #[test]
    fn test_missing_required_argument() {
        let defn = spend_definition();
        let mut state = GameState::new(2, 42);
        state.set_player_state(PlayerId::new(0), "coins", 3);

        let err =
            execute_action(&defn, &mut state, PlayerId::new(0), "spend", &PartialArgs::new())
                .unwrap_err();
        assert_eq!(
            err,
            PickError::MissingArgument {
                pick: "amount".to_string()
            }
        );
    }

    #[test]
    fn test_optional_pick_may_be_omitted() {
        let defn = spend_definition();
        let mut state = GameState::new(2, 42);
        let player = PlayerId::new(0);
        state.set_player_state(player, "coins", 3);

        let mut args = PartialArgs::new();
        args.insert("amount", PickValue::Number(1));
        // "memo" omitted.

        execute_action(&defn, &mut state, player, "spend", &args).unwrap();
    }

    #[test]
    fn test_unknown_action() {
        let defn = spend_definition();
        let mut state = GameState::new(2, 42);

        let err = execute_action(
            &defn,
            &mut state,
            PlayerId::new(0),
            "teleport",
            &PartialArgs::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PickError::UnknownAction {
                action: "teleport".to_string()
            }
        );
    }

    #[test]
    fn test_gate_folds_multi_value_accumulation() {
        // A disabled rule that fires only against accumulated values must
        // also fire at the gate, not just during round-by-round resolution.
        let defn = GameDefinition::new().with_action(
            ActionDeclaration::builder("meld")
                .pick(
                    PickDeclaration::elements("cards", 2, 2, |_, ctx| {
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
                    }),
                )
                .effect(|state, _, player| {
                    state.modify_player_state(player, "melds", 1);
                })
                .build(),
        );

        let mut state = GameState::new(2, 42);
        let player = PlayerId::new(0);
        let h1 = state.spawn("card", "h1");
        let h2 = state.spawn("card", "h2");
        let s1 = state.spawn("card", "s1");
        for id in [h1, h2] {
            state.element_mut(id).unwrap().set_attr("suit", 1);
        }
        state.element_mut(s1).unwrap().set_attr("suit", 2);

        let mut same_suit = PartialArgs::new();
        same_suit.insert_many("cards", [h1, h2].map(PickValue::Element));
        let err = execute_action(&defn, &mut state, player, "meld", &same_suit).unwrap_err();
        assert_eq!(err.disabled_reason(), Some("Suit already picked"));
        assert_eq!(state.player_state(player, "melds", 0), 0);

        let mut mixed = PartialArgs::new();
        mixed.insert_many("cards", [h1, s1].map(PickValue::Element));
        execute_action(&defn, &mut state, player, "meld", &mixed).unwrap();
        assert_eq!(state.player_state(player, "melds", 0), 1);
    }

    #[test]
    fn test_later_pick_sees_earlier_validated_values() {
        // The second pick's candidates depend on the first pick's value.
        let defn = GameDefinition::new().with_action(
            ActionDeclaration::builder("scale")
                .pick(PickDeclaration::number("base", 1, 2))
                .pick(PickDeclaration::choice("double", |args, _| {
                    let base = args.value("base").and_then(PickValue::as_number).unwrap_or(0);
                    vec![PickValue::Number(base * 2)]
                }))
                .build(),
        );
        let mut state = GameState::new(2, 42);

        let mut args = PartialArgs::new();
        args.insert("base", PickValue::Number(2));
        args.insert("double", PickValue::Number(4));
        execute_action(&defn, &mut state, PlayerId::new(0), "scale", &args).unwrap();

        let mut bad = PartialArgs::new();
        bad.insert("base", PickValue::Number(2));
        bad.insert("double", PickValue::Number(2)); // would fit base=1
        let err = execute_action(&defn, &mut state, PlayerId::new(0), "scale", &bad).unwrap_err();
        assert!(matches!(err, PickError::NotAValidChoice { .. }));
    }
}
