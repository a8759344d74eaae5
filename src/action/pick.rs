//! Pick declarations: one resolvable choice within an action.
//!
//! A pick is described once at game-definition time and never mutated.
//! It carries:
//! - a kind tag ([`PickKind`], five variants),
//! - a candidate evaluator producing the raw legal values for the current
//!   partial state,
//! - an optional disabled evaluator producing a human-readable reason why
//!   an otherwise-legal candidate is currently unavailable,
//! - a `required` flag, and for variable-cardinality picks a continue
//!   evaluator deciding whether another round is offered.
//!
//! Evaluators are designer-supplied boxed closures stored on the
//! declaration. They must be pure against game state: safe to call
//! repeatedly, no side effects. The engine calls them with the
//! [`PartialArgs`] accumulated from earlier picks in the same attempt and a
//! [`PickContext`] exposing the acting player and live state.

use crate::action::args::{PartialArgs, PickValue};
use crate::core::{EntityId, GameState, PlayerId};

/// Read-only view of live state passed to every evaluator.
pub struct PickContext<'a> {
    /// Current game state. Never mutated by the resolution engine.
    pub state: &'a GameState,
    /// The player resolving the action.
    pub player: PlayerId,
}

impl<'a> PickContext<'a> {
    /// Create a new context.
    pub fn new(state: &'a GameState, player: PlayerId) -> Self {
        Self { state, player }
    }
}

/// Produces the raw candidate values for a pick.
pub type CandidateFn = Box<dyn Fn(&PartialArgs, &PickContext) -> Vec<PickValue> + Send + Sync>;

/// Returns `Some(reason)` if a candidate is currently disabled.
pub type DisabledFn =
    Box<dyn Fn(&PickValue, &PartialArgs, &PickContext) -> Option<String> + Send + Sync>;

/// Decides whether a repeating pick should offer another round, given the
/// values accumulated so far.
pub type ContinueFn = Box<dyn Fn(&[PickValue], &PartialArgs, &PickContext) -> bool + Send + Sync>;

/// Returns `Some(reason)` if a free-text submission is rejected.
pub type TextRuleFn = Box<dyn Fn(&str, &PartialArgs, &PickContext) -> Option<String> + Send + Sync>;

/// The five pick kinds.
///
/// A tagged sum type rather than trait objects: the enumerator and
/// validator match exhaustively on the tag, so adding a kind is a
/// compiler-checked change everywhere it matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickKind {
    /// Select one value from an arbitrary enumerable set.
    Choice,
    /// Select one element reference from the object graph.
    Element,
    /// Select between `min` and `max` element references.
    Elements {
        /// Minimum accepted count.
        min: usize,
        /// Maximum accepted count.
        max: usize,
    },
    /// Select a number in `min..=max`.
    Number {
        /// Smallest legal value.
        min: i64,
        /// Largest legal value.
        max: i64,
    },
    /// Free-form validated text input.
    Text,
}

impl PickKind {
    /// Whether this kind resolves to a value list rather than one value.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Elements { .. })
    }

    /// Cardinality bounds for variable-cardinality kinds.
    #[must_use]
    pub fn cardinality(&self) -> Option<(usize, usize)> {
        match self {
            Self::Elements { min, max } => Some((*min, *max)),
            _ => None,
        }
    }
}

/// Immutable description of one pick within an action.
///
/// Built via the kind-specific constructors plus builder methods:
///
/// ```
/// use turnbase::action::{PickDeclaration, PickValue};
///
/// let color = PickDeclaration::choose_from("color", ["Red", "Green", "Blue"])
///     .with_disabled(|value, _, _| {
///         (value.as_str() == Some("Red")).then(|| "Red is banned".to_string())
///     });
/// assert_eq!(color.name(), "color");
/// ```
pub struct PickDeclaration {
    name: String,
    kind: PickKind,
    required: bool,
    candidates: CandidateFn,
    disabled: Option<DisabledFn>,
    continue_with: Option<ContinueFn>,
    text_rule: Option<TextRuleFn>,
}

impl PickDeclaration {
    fn new(name: impl Into<String>, kind: PickKind, candidates: CandidateFn) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            candidates,
            disabled: None,
            continue_with: None,
            text_rule: None,
        }
    }

    /// A `choice` pick with a dynamic candidate evaluator.
    pub fn choice(
        name: impl Into<String>,
        candidates: impl Fn(&PartialArgs, &PickContext) -> Vec<PickValue> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, PickKind::Choice, Box::new(candidates))
    }

    /// A `choice` pick over a fixed value set.
    pub fn choose_from(
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let values: Vec<PickValue> = values.into_iter().map(PickValue::choice).collect();
        Self::new(
            name,
            PickKind::Choice,
            Box::new(move |_, _| values.clone()),
        )
    }

    /// An `element` pick: select one object reference.
    pub fn element(
        name: impl Into<String>,
        candidates: impl Fn(&PartialArgs, &PickContext) -> Vec<EntityId> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            PickKind::Element,
            Box::new(move |args, ctx| {
                candidates(args, ctx)
                    .into_iter()
                    .map(PickValue::Element)
                    .collect()
            }),
        )
    }

    /// An `elements` pick: select between `min` and `max` object references.
    pub fn elements(
        name: impl Into<String>,
        min: usize,
        max: usize,
        candidates: impl Fn(&PartialArgs, &PickContext) -> Vec<EntityId> + Send + Sync + 'static,
    ) -> Self {
        assert!(min <= max, "elements pick: min must not exceed max");
        Self::new(
            name,
            PickKind::Elements { min, max },
            Box::new(move |args, ctx| {
                candidates(args, ctx)
                    .into_iter()
                    .map(PickValue::Element)
                    .collect()
            }),
        )
    }

    /// A `number` pick over `min..=max`.
    ///
    /// Candidates are the integers in range, so number picks enumerate
    /// like any other pick (the AI adapter relies on this).
    pub fn number(name: impl Into<String>, min: i64, max: i64) -> Self {
        assert!(min <= max, "number pick: min must not exceed max");
        Self::new(
            name,
            PickKind::Number { min, max },
            Box::new(move |_, _| (min..=max).map(PickValue::Number).collect()),
        )
    }

    /// A `text` pick: free-form input, no enumerable candidates.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, PickKind::Text, Box::new(|_, _| Vec::new()))
    }

    /// Attach a disabled evaluator. Absence means "always enabled".
    #[must_use]
    pub fn with_disabled(
        mut self,
        disabled: impl Fn(&PickValue, &PartialArgs, &PickContext) -> Option<String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.disabled = Some(Box::new(disabled));
        self
    }

    /// Attach a continue evaluator for a repeating pick.
    ///
    /// Without one, a repeating pick continues while below `max`.
    #[must_use]
    pub fn with_continue(
        mut self,
        continue_with: impl Fn(&[PickValue], &PartialArgs, &PickContext) -> bool
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.continue_with = Some(Box::new(continue_with));
        self
    }

    /// Attach a validation rule to a `text` pick.
    ///
    /// The rule returns `Some(reason)` to reject a submission; the reason
    /// reaches the player verbatim.
    #[must_use]
    pub fn with_text_rule(
        mut self,
        rule: impl Fn(&str, &PartialArgs, &PickContext) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.text_rule = Some(Box::new(rule));
        self
    }

    /// Mark the pick optional: it may be omitted from the final argument
    /// set, and never blocks reachability.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    // === Accessors ===

    /// Pick name, unique within its action.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind tag.
    #[must_use]
    pub fn kind(&self) -> PickKind {
        self.kind
    }

    /// Whether the pick must appear in the final argument set.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    // === Evaluator invocation ===

    /// Run the candidate evaluator.
    #[must_use]
    pub fn raw_candidates(&self, args: &PartialArgs, ctx: &PickContext) -> Vec<PickValue> {
        (self.candidates)(args, ctx)
    }

    /// Run the disabled evaluator for one candidate.
    #[must_use]
    pub fn disabled_reason(
        &self,
        value: &PickValue,
        args: &PartialArgs,
        ctx: &PickContext,
    ) -> Option<String> {
        self.disabled.as_ref().and_then(|f| f(value, args, ctx))
    }

    /// Whether a repeating pick wants another round after `accumulated`.
    #[must_use]
    pub fn continue_requested(
        &self,
        accumulated: &[PickValue],
        args: &PartialArgs,
        ctx: &PickContext,
    ) -> bool {
        match &self.continue_with {
            Some(f) => f(accumulated, args, ctx),
            None => match self.kind.cardinality() {
                Some((_, max)) => accumulated.len() < max,
                None => false,
            },
        }
    }

    /// Run the text rule for a free-form submission.
    #[must_use]
    pub fn text_rejection(
        &self,
        text: &str,
        args: &PartialArgs,
        ctx: &PickContext,
    ) -> Option<String> {
        self.text_rule.as_ref().and_then(|f| f(text, args, ctx))
    }
}

impl std::fmt::Debug for PickDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickDeclaration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("has_disabled", &self.disabled.is_some())
            .finish()
    }
}
