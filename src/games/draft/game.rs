//! Card-draft game implementation.
//!
//! A deliberately small game that still exercises every pick kind the
//! engine supports: players take cards from a shared market while they
//! can afford them, scrap owned cards for coins, and bid for turn order.

use crate::action::{ActionDeclaration, PickDeclaration, PickValue};
use crate::core::{GameState, PlayerId};
use crate::rules::GameDefinition;

/// Builder for a draft game.
pub struct DraftGameBuilder {
    player_count: usize,
    starting_coins: i64,
    market_size: usize,
}

impl Default for DraftGameBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_coins: 5,
            market_size: 8,
        }
    }
}

impl DraftGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=8).contains(&count), "Player count must be 2-8");
        self.player_count = count;
        self
    }

    pub fn starting_coins(mut self, coins: i64) -> Self {
        self.starting_coins = coins;
        self
    }

    pub fn market_size(mut self, size: usize) -> Self {
        self.market_size = size;
        self
    }

    /// Build the definition and initial state.
    pub fn build(self, seed: u64) -> (GameDefinition, GameState) {
        let mut state = GameState::new(self.player_count, seed);

        for player in PlayerId::all(self.player_count) {
            state.set_player_state(player, "coins", self.starting_coins);
        }

        // Market cards with costs 1..=5, dealt in shuffled order.
        let mut costs: Vec<i64> = (0..self.market_size).map(|i| (i as i64 % 5) + 1).collect();
        state.rng.shuffle(&mut costs);
        for (i, cost) in costs.into_iter().enumerate() {
            let id = state.spawn("card", format!("Card {i}"));
            let card = state.element_mut(id).unwrap();
            card.set_attr("cost", cost);
            card.set_attr("power", cost + 1);
        }

        let definition = GameDefinition::new()
            .with_action(take_action())
            .with_action(scrap_action())
            .with_action(bid_action())
            .with_action(ActionDeclaration::builder("pass").build());

        (definition, state)
    }
}

/// Take one affordable market card.
fn take_action() -> ActionDeclaration {
    ActionDeclaration::builder("take")
        .pick(
            PickDeclaration::element("card", |_, ctx| {
                ctx.state
                    .elements_where(|e| e.kind == "card" && e.owner.is_none())
            })
            .with_disabled(|value, _, ctx| {
                let id = value.as_element()?;
                let card = ctx.state.element(id)?;
                let coins = ctx.state.player_state(ctx.player, "coins", 0);
                (card.attr("cost", 0) > coins).then(|| format!("Cannot afford {}", card.name))
            }),
        )
        .effect(|state, args, player| {
            let Some(id) = args.value("card").and_then(PickValue::as_element) else {
                return;
            };
            let cost = state.element(id).map_or(0, |c| c.attr("cost", 0));
            if let Some(card) = state.element_mut(id) {
                card.owner = Some(player);
            }
            state.modify_player_state(player, "coins", -cost);
        })
        .build()
}

/// Scrap one or two owned cards for a coin each.
fn scrap_action() -> ActionDeclaration {
    ActionDeclaration::builder("scrap")
        .pick(PickDeclaration::elements("cards", 1, 2, |_, ctx| {
            ctx.state
                .elements_where(|e| e.kind == "card" && e.owner == Some(ctx.player))
        }))
        .effect(|state, args, player| {
            let ids: Vec<_> = args
                .values_of("cards")
                .iter()
                .filter_map(PickValue::as_element)
                .collect();
            for id in ids {
                state.remove_element(id);
                state.modify_player_state(player, "coins", 1);
            }
        })
        .build()
}

/// Bid coins for turn order next round.
fn bid_action() -> ActionDeclaration {
    ActionDeclaration::builder("bid")
        .pick(
            PickDeclaration::number("amount", 1, 5).with_disabled(|value, _, ctx| {
                let coins = ctx.state.player_state(ctx.player, "coins", 0);
                (value.as_number().unwrap_or(0) > coins).then(|| "Not enough coins".to_string())
            }),
        )
        .effect(|state, args, player| {
            let amount = args.value("amount").and_then(PickValue::as_number).unwrap_or(0);
            state.modify_player_state(player, "coins", -amount);
            state.set_player_state(player, "bid", amount);
        })
        .build()
}
