//! Request synchronization planning
//!
//! Pure functions deciding which requests to create and how existing ones
//! must change. No platform calls happen here.

use crate::chain::{desired_base, Segment};
use crate::sync::description::{render_region, splice_region, ChainEntry};
use crate::sync::index::OpenPrIndex;
use crate::types::{PrUpdate, PullRequest};

/// A request that needs to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrToCreate {
    /// Head branch
    pub branch: String,
    /// Base branch (previous segment or root)
    pub base: String,
    /// Title from the first commit's headline
    pub title: String,
}

/// Changes to apply to an existing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrChange {
    /// Head branch
    pub branch: String,
    /// PR/MR number
    pub pr_number: u64,
    /// Base currently recorded
    pub current_base: String,
    /// Fields that differ from the platform's state
    pub update: PrUpdate,
}

/// Segments without an open request
pub fn plan_creations(segments: &[Segment], index: &OpenPrIndex, root: &str) -> Vec<PrToCreate> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| index.count(&seg.branch) == 0)
        .map(|(idx, seg)| PrToCreate {
            branch: seg.branch.clone(),
            base: desired_base(segments, idx, root).to_string(),
            title: seg.title().to_string(),
        })
        .collect()
}

/// The chain list as shown in every description
///
/// Segments without a request yet (dry runs) use the segment title.
pub fn chain_entries<'a>(segments: &'a [Segment], index: &'a OpenPrIndex) -> Vec<ChainEntry<'a>> {
    segments
        .iter()
        .map(|seg| match index.get(&seg.branch) {
            Some(pr) => ChainEntry {
                branch: &seg.branch,
                number: Some(pr.number),
                title: &pr.title,
            },
            None => ChainEntry {
                branch: &seg.branch,
                number: None,
                title: seg.title(),
            },
        })
        .collect()
}

/// Compute the update for the `idx`-th segment's request, `None` if the
/// request is already up to date
pub fn plan_update(
    segments: &[Segment],
    idx: usize,
    pr: &PullRequest,
    entries: &[ChainEntry<'_>],
    root: &str,
) -> Option<PrChange> {
    let segment = &segments[idx];
    let base = desired_base(segments, idx, root);

    let region = render_region(segment, entries, idx, root);
    let body = splice_region(&pr.body, &region);

    let update = PrUpdate {
        base: (pr.base_ref != base).then(|| base.to_string()),
        body: (body != pr.body).then_some(body),
    };

    if update.is_empty() {
        return None;
    }

    Some(PrChange {
        branch: segment.branch.clone(),
        pr_number: pr.number,
        current_base: pr.base_ref.clone(),
        update,
    })
}
