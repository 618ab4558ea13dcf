//! Base-graph reconciliation
//!
//! Before force-pushing a reordered chain, pull requests whose recorded base
//! disagrees with the new order are pointed at the root branch. Otherwise the
//! platform may see the pushed head as unrelated to its base and close the
//! request.

use crate::chain::Segment;
use crate::sync::index::OpenPrIndex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A pull request whose base must be temporarily reset to the root branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseReset {
    /// Head branch of the request
    pub branch: String,
    /// PR/MR number
    pub pr_number: u64,
    /// Base recorded on the platform
    pub current_base: String,
}

/// Branches, in chain order, whose requests take part in a stale base
/// relationship
///
/// `order` is the desired chain order and `recorded_base` maps each branch
/// that has an open request to its recorded base. Walking the chain, each
/// branch with a request is appended to `seen`. A request is stale when its
/// base:
/// - was seen, but is not the last entry of `seen`: the base and everything
///   after it in `seen`, plus the branch itself, are flagged;
/// - is a chain branch that comes later in `order`, i.e. the recorded and
///   desired bases form a cycle: the branch and everything up to that base
///   are flagged.
///
/// Resetting more than strictly necessary is harmless; the final bases are
/// restored during synchronization.
pub fn branches_to_reset<'a>(order: &[&'a str], recorded_base: &HashMap<&str, &str>) -> Vec<&'a str> {
    let position: HashMap<&str, usize> = order.iter().enumerate().map(|(i, b)| (*b, i)).collect();
    let mut seen: Vec<&str> = Vec::new();
    let mut flagged: HashSet<&str> = HashSet::new();

    for (i, &branch) in order.iter().enumerate() {
        let Some(&base) = recorded_base.get(branch) else {
            continue;
        };

        if let Some(idx) = seen.iter().position(|s| *s == base) {
            if idx + 1 != seen.len() {
                flagged.extend(&seen[idx + 1..]);
                flagged.insert(branch);
            }
        } else if let Some(&later) = position.get(base).filter(|&&p| p > i) {
            flagged.extend(&order[i..=later]);
        }

        seen.push(branch);
    }

    order
        .iter()
        .copied()
        .filter(|b| flagged.contains(b))
        .collect()
}

/// Base updates needed before pushing `segments`
///
/// Only requests not already based on `root` are returned.
pub fn plan_base_resets(segments: &[Segment], index: &OpenPrIndex, root: &str) -> Vec<BaseReset> {
    let order: Vec<&str> = segments.iter().map(|s| s.branch.as_str()).collect();
    let recorded_base: HashMap<&str, &str> = order
        .iter()
        .filter_map(|b| index.get(b).map(|pr| (*b, pr.base_ref.as_str())))
        .collect();

    let flagged = branches_to_reset(&order, &recorded_base);
    debug!("Branches in stale base relationships: {flagged:?}");

    flagged
        .into_iter()
        .filter(|b| *b != root)
        .filter_map(|b| index.get(b))
        .filter(|pr| pr.base_ref != root)
        .map(|pr| BaseReset {
            branch: pr.head_ref.clone(),
            pr_number: pr.number,
            current_base: pr.base_ref.clone(),
        })
        .collect()
}
