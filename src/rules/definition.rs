//! Game definition: the registry of action declarations.
//!
//! Built once at startup and held by reference thereafter. The definition
//! also answers the flow layer's one question: which actions are currently
//! offerable to a player? An action with no valid completion path is
//! hidden, not offered.

use tracing::debug;

use crate::action::{ActionDeclaration, PartialArgs, PickContext};
use crate::core::{GameState, PlayerId};
use crate::error::PickError;
use crate::resolve::{has_valid_selection_path, Exploration};

/// A game's full set of action declarations.
pub struct GameDefinition {
    actions: Vec<ActionDeclaration>,
}

impl GameDefinition {
    /// Create an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Add an action declaration (builder pattern).
    ///
    /// Panics on a duplicate action name; definitions are trusted
    /// designer code.
    #[must_use]
    pub fn with_action(mut self, action: ActionDeclaration) -> Self {
        assert!(
            self.actions.iter().all(|a| a.name() != action.name()),
            "duplicate action name '{}'",
            action.name()
        );
        self.actions.push(action);
        self
    }

    /// Look up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&ActionDeclaration> {
        self.actions.iter().find(|a| a.name() == name)
    }

    /// All declared actions, in registration order.
    #[must_use]
    pub fn actions(&self) -> &[ActionDeclaration] {
        &self.actions
    }

    /// Whether an action is currently offerable to a player.
    ///
    /// Runs the reachability checker from an empty partial-argument set
    /// with the conservative approximation - the availability filter
    /// trades exactness for speed.
    #[must_use]
    pub fn is_available(&self, name: &str, state: &GameState, player: PlayerId) -> bool {
        let Some(action) = self.action(name) else {
            return false;
        };
        let ctx = PickContext::new(state, player);
        has_valid_selection_path(action, &PartialArgs::new(), &ctx, Exploration::Conservative)
    }

    /// Like [`GameDefinition::is_available`], but with the reason as an
    /// error: unknown name or no valid completion path.
    ///
    /// Session layers use this to answer a direct "start this action"
    /// request, where a silent `false` would leave the client guessing.
    pub fn check_available(
        &self,
        name: &str,
        state: &GameState,
        player: PlayerId,
    ) -> Result<&ActionDeclaration, PickError> {
        let action = self.action(name).ok_or_else(|| PickError::UnknownAction {
            action: name.to_string(),
        })?;
        let ctx = PickContext::new(state, player);
        if !has_valid_selection_path(action, &PartialArgs::new(), &ctx, Exploration::Conservative) {
            return Err(PickError::UnreachableAction {
                action: name.to_string(),
            });
        }
        Ok(action)
    }

    /// Names of every action currently offerable to a player.
    #[must_use]
    pub fn available_actions(&self, state: &GameState, player: PlayerId) -> Vec<&str> {
        let ctx = PickContext::new(state, player);
        let available: Vec<&str> = self
            .actions
            .iter()
            .filter(|action| {
                has_valid_selection_path(
                    action,
                    &PartialArgs::new(),
                    &ctx,
                    Exploration::Conservative,
                )
            })
            .map(ActionDeclaration::name)
            .collect();

        debug!(
            %player,
            offered = available.len(),
            declared = self.actions.len(),
            "computed available actions"
        );

        available
    }
}

impl Default for GameDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameDefinition")
            .field("actions", &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>())
            .finish()
    }
}
