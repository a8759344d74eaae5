//! Forward reachability: can this action still be completed?
//!
//! Starting from a (possibly empty) partial argument set, decides whether
//! some assignment of the remaining picks exists in which every value is
//! both a legal candidate and enabled. Actions with no legal completion
//! are hidden rather than offered.
//!
//! The hard rule pair:
//! - a **required** pick whose enabled set is empty makes the whole path
//!   unreachable, immediately;
//! - an **optional** pick whose enabled set is empty is skipped entirely
//!   and never blocks reachability.
//!
//! Two guarantee levels are offered, chosen per call site:
//! - [`Exploration::Conservative`] (the default): per remaining pick, one
//!   enabled candidate suffices (for cardinality picks, plus a candidate
//!   pool at least `min` large). Cheap, an over-approximation - suitable
//!   for "is this action worth offering" filtering, not a guarantee that
//!   every chosen path to completion succeeds.
//! - [`Exploration::Exhaustive`]: explores each enabled candidate's
//!   resulting partial state (and the skip branch of optional picks),
//!   re-enumerating successors per branch. Exact, exponentially more
//!   expensive; used when later picks are known to depend on which value
//!   was chosen.
//!
//! Text picks are free-form input and are treated as always satisfiable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{ActionDeclaration, PartialArgs, PickContext, PickDeclaration, PickKind};

use super::candidates::choices;

/// How thoroughly the checker explores the remaining picks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Exploration {
    /// One enabled candidate per pick suffices (fast over-approximation).
    #[default]
    Conservative,
    /// Full per-candidate exploration (exact, exponential worst case).
    Exhaustive,
}

/// Outcome of a reachability query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Whether some legal, fully-enabled completion exists.
    pub reachable: bool,
    /// Index of the pick where the path was cut off, for diagnostics
    /// only. Under exhaustive exploration this is the furthest pick any
    /// branch reached before failing.
    pub blocked_at: Option<usize>,
}

/// Whether some legal, fully-enabled completion of `action` exists
/// starting from `args`.
#[must_use]
pub fn has_valid_selection_path(
    action: &ActionDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
    mode: Exploration,
) -> bool {
    selection_path(action, args, ctx, mode).reachable
}

/// Reachability with the blocking pick index for diagnostics.
#[must_use]
pub fn selection_path(
    action: &ActionDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
    mode: Exploration,
) -> PathResult {
    let result = match mode {
        Exploration::Conservative => conservative(action, args, ctx),
        Exploration::Exhaustive => exhaustive(action, args, ctx),
    };

    if !result.reachable {
        debug!(
            action = action.name(),
            blocked_at = ?result.blocked_at,
            ?mode,
            "no valid selection path"
        );
    }

    result
}

fn conservative(action: &ActionDeclaration, args: &PartialArgs, ctx: &PickContext) -> PathResult {
    for (idx, pick) in action.picks().iter().enumerate() {
        if args.contains(pick.name()) || pick.kind() == PickKind::Text {
            continue;
        }

        let candidates = choices(pick, args, ctx);
        let enabled = candidates.iter().filter(|c| c.enabled()).count();

        // For cardinality picks a disabled annotation can flip as values
        // accumulate, so counting enabled against empty accumulation would
        // wrongly rule out enable-as-you-go paths. Only the candidate pool
        // itself bounds what this cheap pass may reject.
        let passable = match pick.kind().cardinality() {
            Some((min, _)) => min == 0 || (enabled >= 1 && candidates.len() >= min),
            None => enabled >= 1,
        };

        if passable {
            continue;
        }

        if pick.required() {
            // Short-circuit: do not evaluate further picks.
            return PathResult {
                reachable: false,
                blocked_at: Some(idx),
            };
        }
        // Optional pick: skipped entirely, contributes nothing downstream.
    }

    PathResult {
        reachable: true,
        blocked_at: None,
    }
}

fn exhaustive(action: &ActionDeclaration, args: &PartialArgs, ctx: &PickContext) -> PathResult {
    let mut furthest = 0;
    let reachable = explore(action.picks(), 0, args, ctx, &mut furthest);
    PathResult {
        reachable,
        blocked_at: (!reachable).then_some(furthest),
    }
}

fn explore(
    picks: &[PickDeclaration],
    idx: usize,
    args: &PartialArgs,
    ctx: &PickContext,
    furthest: &mut usize,
) -> bool {
    let Some(pick) = picks.get(idx) else {
        return true;
    };

    if args.contains(pick.name()) || pick.kind() == PickKind::Text {
        return explore(picks, idx + 1, args, ctx, furthest);
    }

    *furthest = (*furthest).max(idx);

    if pick.kind().cardinality().is_some() {
        return explore_elements(picks, idx, pick, &[], args, ctx, furthest);
    }

    let enabled: Vec<_> = choices(pick, args, ctx)
        .into_iter()
        .filter(|c| c.enabled())
        .map(|c| c.value)
        .collect();

    for value in &enabled {
        let mut next = args.clone();
        next.insert(pick.name(), value.clone());
        if explore(picks, idx + 1, &next, ctx, furthest) {
            return true;
        }
    }

    // Every candidate branch dead-ends downstream (or none was enabled).
    // An optional pick can still be skipped; a required one blocks here.
    !pick.required() && explore(picks, idx + 1, args, ctx, furthest)
}

fn explore_elements(
    picks: &[PickDeclaration],
    idx: usize,
    pick: &PickDeclaration,
    accumulated: &[crate::action::PickValue],
    args: &PartialArgs,
    ctx: &PickContext,
    furthest: &mut usize,
) -> bool {
    let (min, max) = pick.kind().cardinality().unwrap_or((1, 1));

    // Stop here if cardinality permits, and see whether the rest completes.
    if accumulated.len() >= min {
        let mut next = args.clone();
        next.insert_many(pick.name(), accumulated.iter().cloned());
        if explore(picks, idx + 1, &next, ctx, furthest) {
            return true;
        }
    }

    // Extend one value at a time; candidates and disabled status are
    // re-evaluated against the accumulation so far.
    if accumulated.len() < max {
        let mut scoped = args.clone();
        scoped.insert_many(pick.name(), accumulated.iter().cloned());

        let enabled: Vec<_> = choices(pick, &scoped, ctx)
            .into_iter()
            .filter(|c| c.enabled())
            .map(|c| c.value)
            .collect();

        for value in enabled {
            if accumulated.contains(&value) {
                continue;
            }
            let mut deeper = accumulated.to_vec();
            deeper.push(value);
            if explore_elements(picks, idx, pick, &deeper, args, ctx, furthest) {
                return true;
            }
        }
    }

    // No accumulation completed. An optional elements pick may be
    // omitted entirely.
    accumulated.is_empty() && !pick.required() && explore(picks, idx + 1, args, ctx, furthest)
}
