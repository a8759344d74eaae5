//! Pick values and the accumulated argument set.
//!
//! ## PickValue
//!
//! The raw value a candidate or submission carries. Element values are
//! arena IDs, so comparing two element values is an integer comparison;
//! primitives compare by equality.
//!
//! ## PartialArgs
//!
//! The not-yet-finalized pick values for one in-progress action attempt,
//! built up in declared pick order. Owned exclusively by the caller driving
//! the attempt; cancelling the attempt is just dropping the value.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;

/// One raw pick value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PickValue {
    /// A value from an arbitrary enumerable set (a `choice` pick).
    Choice(String),
    /// A reference into the game's object graph (an `element`/`elements` pick).
    Element(EntityId),
    /// A numeric value (a `number` pick).
    Number(i64),
    /// Free-form text (a `text` pick).
    Text(String),
}

impl PickValue {
    /// Convenience constructor for a choice value.
    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    /// Convenience constructor for a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The element ID, if this is an element value.
    #[must_use]
    pub fn as_element(&self) -> Option<EntityId> {
        match self {
            Self::Element(id) => Some(*id),
            _ => None,
        }
    }

    /// The number, if this is a number value.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string contents, if this is a choice or text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<EntityId> for PickValue {
    fn from(id: EntityId) -> Self {
        Self::Element(id)
    }
}

impl From<i64> for PickValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl std::fmt::Display for PickValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Choice(s) | Self::Text(s) => write!(f, "{s}"),
            Self::Element(id) => write!(f, "{id}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A resolved argument for one pick: a single value, or the value list of
/// a multi-value pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PickArg {
    /// Single-value pick result.
    One(PickValue),
    /// Multi-value pick result, in acceptance order.
    Many(SmallVec<[PickValue; 4]>),
}

impl PickArg {
    /// View the argument as a value slice (length 1 for `One`).
    #[must_use]
    pub fn values(&self) -> &[PickValue] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(vs) => vs,
        }
    }
}

/// The accumulated pick values for one in-progress action attempt.
///
/// Keys are pick names. Discarded on completion, cancellation, or
/// validation failure; never shared across concurrent attempts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialArgs {
    values: FxHashMap<String, PickArg>,
}

impl PartialArgs {
    /// Create an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single-value pick result.
    pub fn insert(&mut self, pick: impl Into<String>, value: PickValue) {
        self.values.insert(pick.into(), PickArg::One(value));
    }

    /// Record a multi-value pick result.
    pub fn insert_many(
        &mut self,
        pick: impl Into<String>,
        values: impl IntoIterator<Item = PickValue>,
    ) {
        self.values
            .insert(pick.into(), PickArg::Many(values.into_iter().collect()));
    }

    /// Get the argument recorded for a pick.
    #[must_use]
    pub fn get(&self, pick: &str) -> Option<&PickArg> {
        self.values.get(pick)
    }

    /// Get the single value recorded for a pick, if any.
    #[must_use]
    pub fn value(&self, pick: &str) -> Option<&PickValue> {
        match self.values.get(pick) {
            Some(PickArg::One(v)) => Some(v),
            _ => None,
        }
    }

    /// The values recorded for a pick, empty if the pick is unresolved.
    #[must_use]
    pub fn values_of(&self, pick: &str) -> &[PickValue] {
        self.values.get(pick).map_or(&[], PickArg::values)
    }

    /// Whether a pick has been resolved.
    #[must_use]
    pub fn contains(&self, pick: &str) -> bool {
        self.values.contains_key(pick)
    }

    /// Remove a recorded argument, returning it.
    pub fn remove(&mut self, pick: &str) -> Option<PickArg> {
        self.values.remove(pick)
    }

    /// Number of resolved picks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no picks have been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(PickValue::choice("Red").as_str(), Some("Red"));
        assert_eq!(PickValue::Number(5).as_number(), Some(5));
        assert_eq!(
            PickValue::Element(EntityId(3)).as_element(),
            Some(EntityId(3))
        );
        assert_eq!(PickValue::Number(5).as_str(), None);
    }

    #[test]
    fn test_value_equality_is_by_id_for_elements() {
        assert_eq!(
            PickValue::Element(EntityId(1)),
            PickValue::Element(EntityId(1))
        );
        assert_ne!(
            PickValue::Element(EntityId(1)),
            PickValue::Element(EntityId(2))
        );
    }

    #[test]
    fn test_arg_values_slice() {
        let one = PickArg::One(PickValue::Number(1));
        assert_eq!(one.values().len(), 1);

        let many = PickArg::Many(
            [PickValue::Number(1), PickValue::Number(2)]
                .into_iter()
                .collect(),
        );
        assert_eq!(many.values().len(), 2);
    }

    #[test]
    fn test_partial_args_roundtrip() {
        let mut args = PartialArgs::new();
        assert!(args.is_empty());

        args.insert("color", PickValue::choice("Red"));
        args.insert_many("cards", [PickValue::Element(EntityId(1))]);

        assert_eq!(args.len(), 2);
        assert!(args.contains("color"));
        assert_eq!(args.value("color"), Some(&PickValue::choice("Red")));
        assert_eq!(args.values_of("cards").len(), 1);
        assert_eq!(args.values_of("missing"), &[]);
        assert_eq!(args.value("cards"), None); // Many, not One

        args.remove("color");
        assert!(!args.contains("color"));
    }

    #[test]
    fn test_serialization() {
        let mut args = PartialArgs::new();
        args.insert("n", PickValue::Number(3));

        let json = serde_json::to_string(&args).unwrap();
        let back: PartialArgs = serde_json::from_str(&json).unwrap();
        assert_eq!(args, back);
    }
}
