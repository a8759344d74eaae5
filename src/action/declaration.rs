//! Action declarations: an ordered pick sequence plus an effect.
//!
//! Declarations are immutable and created once at game-definition time.
//! Pick order matters: later picks may depend on earlier ones through the
//! accumulated [`PartialArgs`].

use tracing::trace;

use crate::action::args::PartialArgs;
use crate::action::pick::PickDeclaration;
use crate::core::{GameState, PlayerId};

/// Runs after every pick of an action is validly resolved. The only place
/// durable game state is mutated.
pub type EffectFn = Box<dyn Fn(&mut GameState, &PartialArgs, PlayerId) + Send + Sync>;

/// A player-initiated operation: ordered picks followed by an effect.
pub struct ActionDeclaration {
    name: String,
    picks: Vec<PickDeclaration>,
    effect: EffectFn,
}

impl ActionDeclaration {
    /// Start building an action declaration.
    ///
    /// ```
    /// use turnbase::action::{ActionDeclaration, PickDeclaration};
    ///
    /// let action = ActionDeclaration::builder("discard")
    ///     .pick(PickDeclaration::choose_from("color", ["Red", "Green"]))
    ///     .effect(|_state, _args, _player| {})
    ///     .build();
    /// assert_eq!(action.name(), "discard");
    /// ```
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            name: name.into(),
            picks: Vec::new(),
            effect: None,
        }
    }

    /// Unique action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The picks in declared (resolution) order.
    #[must_use]
    pub fn picks(&self) -> &[PickDeclaration] {
        &self.picks
    }

    /// Look up a pick by name.
    #[must_use]
    pub fn pick(&self, name: &str) -> Option<&PickDeclaration> {
        self.picks.iter().find(|p| p.name() == name)
    }

    /// Run the effect. Call only after every pick has passed validation.
    pub fn run_effect(&self, state: &mut GameState, args: &PartialArgs, player: PlayerId) {
        trace!(action = %self.name, %player, "running action effect");
        (self.effect)(state, args, player);
    }
}

impl std::fmt::Debug for ActionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDeclaration")
            .field("name", &self.name)
            .field("picks", &self.picks)
            .finish()
    }
}

/// Builder for [`ActionDeclaration`].
pub struct ActionBuilder {
    name: String,
    picks: Vec<PickDeclaration>,
    effect: Option<EffectFn>,
}

impl ActionBuilder {
    /// Append a pick. Picks resolve in the order they are added.
    ///
    /// Panics if the pick name repeats within this action; declarations
    /// are trusted designer code, so that is a definition-time bug.
    #[must_use]
    pub fn pick(mut self, pick: PickDeclaration) -> Self {
        assert!(
            self.picks.iter().all(|p| p.name() != pick.name()),
            "action '{}': duplicate pick name '{}'",
            self.name,
            pick.name()
        );
        self.picks.push(pick);
        self
    }

    /// Set the effect.
    #[must_use]
    pub fn effect(
        mut self,
        effect: impl Fn(&mut GameState, &PartialArgs, PlayerId) + Send + Sync + 'static,
    ) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }

    /// Finish the declaration. An unset effect becomes a no-op.
    #[must_use]
    pub fn build(self) -> ActionDeclaration {
        ActionDeclaration {
            name: self.name,
            picks: self.picks,
            effect: self.effect.unwrap_or_else(|| Box::new(|_, _, _| {})),
        }
    }
}
