//! AI adapter: bare enabled values for search algorithms.
//!
//! Search agents stay agnostic to *why* a move is illegal - they only need
//! the enabled set, sampled possibly thousands of times per search. The
//! adapter filters the annotated candidate list down to enabled values and
//! strips the annotations.

use tracing::trace;

use crate::action::{ActionDeclaration, PartialArgs, PickContext, PickDeclaration, PickKind, PickValue};
use crate::core::GameRng;
use crate::resolve::choices;

/// The enabled candidate values for a pick, bare.
///
/// Always a subset of the values `choices` returns: exactly those with no
/// disabled reason.
#[must_use]
pub fn legal_values(
    pick: &PickDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
) -> Vec<PickValue> {
    choices(pick, args, ctx)
        .into_iter()
        .filter(|c| c.enabled())
        .map(|c| c.value)
        .collect()
}

/// Draw one enabled value uniformly at random.
///
/// The playout hot path: returns `None` when nothing is enabled.
#[must_use]
pub fn sample_value(
    pick: &PickDeclaration,
    args: &PartialArgs,
    ctx: &PickContext,
    rng: &mut GameRng,
) -> Option<PickValue> {
    let values = legal_values(pick, args, ctx);
    rng.choose(&values).cloned()
}

/// Enumerate every complete, fully-enabled argument set for an action.
///
/// Recurses pick by pick, re-enumerating each pick's candidates against
/// the partial state built so far (later picks may depend on which value
/// was chosen earlier). For `elements` picks every accumulation order
/// with count in `[min, max]` is explored; output can grow combinatorially,
/// so this is for search over small actions, not a general solver.
///
/// Optional picks contribute both a skip branch and one branch per enabled
/// value. Text picks have no enumerable values and are skipped; a search
/// agent must fill them in separately if the action's effect reads them.
#[must_use]
pub fn legal_completions(action: &ActionDeclaration, ctx: &PickContext) -> Vec<PartialArgs> {
    let mut out = Vec::new();
    complete(action.picks(), 0, PartialArgs::new(), ctx, &mut out);
    trace!(action = action.name(), count = out.len(), "enumerated completions");
    out
}

fn complete(
    picks: &[crate::action::PickDeclaration],
    idx: usize,
    args: PartialArgs,
    ctx: &PickContext,
    out: &mut Vec<PartialArgs>,
) {
    let Some(pick) = picks.get(idx) else {
        out.push(args);
        return;
    };

    if pick.kind() == PickKind::Text {
        complete(picks, idx + 1, args, ctx, out);
        return;
    }

    if let Some((min, max)) = pick.kind().cardinality() {
        complete_elements(picks, idx, pick, min, max, &[], &args, ctx, out);
        return;
    }

    let values = legal_values(pick, &args, ctx);

    if values.is_empty() || !pick.required() {
        // Skip branch: an optional pick omitted entirely, or a required
        // pick with nothing enabled (no completion through it exists).
        if !pick.required() {
            complete(picks, idx + 1, args.clone(), ctx, out);
        }
        if values.is_empty() {
            return;
        }
    }

    for value in values {
        let mut next = args.clone();
        next.insert(pick.name(), value);
        complete(picks, idx + 1, next, ctx, out);
    }
}

#[allow(clippy::too_many_arguments)]
fn complete_elements(
    picks: &[crate::action::PickDeclaration],
    idx: usize,
    pick: &PickDeclaration,
    min: usize,
    max: usize,
    accumulated: &[PickValue],
    args: &PartialArgs,
    ctx: &PickContext,
    out: &mut Vec<PartialArgs>,
) {
    if accumulated.len() >= min {
        let mut next = args.clone();
        next.insert_many(pick.name(), accumulated.iter().cloned());
        complete(picks, idx + 1, next, ctx, out);
    }

    if accumulated.len() < max {
        let mut scoped = args.clone();
        scoped.insert_many(pick.name(), accumulated.iter().cloned());

        for value in legal_values(pick, &scoped, ctx) {
            if accumulated.contains(&value) {
                continue;
            }
            let mut deeper = accumulated.to_vec();
            deeper.push(value);
            complete_elements(picks, idx, pick, min, max, &deeper, args, ctx, out);
        }
    }

    if accumulated.is_empty() && !pick.required() && min > 0 {
        complete(picks, idx + 1, args.clone(), ctx, out);
    }
}
