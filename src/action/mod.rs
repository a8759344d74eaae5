//! Static action and pick declarations.
//!
//! Everything here is created once at game-definition time and held by
//! reference for the process lifetime:
//! - `PickDeclaration`: one resolvable choice (kind tag + evaluators)
//! - `ActionDeclaration`: ordered picks plus an effect
//! - `PickValue`/`PartialArgs`: the values flowing through resolution
//!
//! Runtime resolution lives in [`crate::resolve`].

pub mod args;
pub mod declaration;
pub mod pick;

pub use args::{PartialArgs, PickArg, PickValue};
pub use declaration::{ActionBuilder, ActionDeclaration, EffectFn};
pub use pick::{
    CandidateFn, ContinueFn, DisabledFn, PickContext, PickDeclaration, PickKind, TextRuleFn,
};
