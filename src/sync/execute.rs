//! Chain synchronization
//!
//! Runs the full push sequence against a hosting service: fetch open
//! requests, reset stale bases, push every segment, then create and update
//! requests until the service matches the local chain.

use crate::chain::Chain;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::repo::GitBackend;
use crate::sync::index::OpenPrIndex;
use crate::sync::plan::{chain_entries, plan_creations, plan_update};
use crate::sync::progress::{Phase, ProgressCallback};
use crate::sync::push::push_segments;
use crate::sync::reconcile::plan_base_resets;
use crate::types::{PrUpdate, PullRequest};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of synchronizing a chain
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Branches that were force-pushed
    pub pushed_branches: Vec<String>,
    /// Requests whose base was temporarily pointed at the root branch
    pub reset_prs: Vec<PullRequest>,
    /// Requests that were created
    pub created_prs: Vec<PullRequest>,
    /// Requests whose base or description changed
    pub updated_prs: Vec<PullRequest>,
    /// Open requests after synchronization
    pub index: OpenPrIndex,
}

/// Synchronize `chain` with the hosting service
///
/// In dry-run mode nothing is pushed, created or updated; every step is
/// still computed and reported through `progress`.
#[allow(clippy::too_many_lines)]
pub async fn sync_chain(
    chain: &Chain,
    backend: Arc<dyn GitBackend>,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<SyncResult> {
    let mut result = SyncResult::default();
    let segments = &chain.segments;
    let root = chain.root_branch();

    if segments.is_empty() {
        progress.on_message("No branches to push").await;
        return Ok(result);
    }

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
    }

    progress.on_phase(Phase::Analyzing).await;
    let open = platform.list_open_prs().await?;
    debug!("Found {} open requests", open.len());
    let mut index = OpenPrIndex::from_prs(open);
    index.check_unambiguous(segments)?;

    progress.on_phase(Phase::ResettingBases).await;
    for reset in plan_base_resets(segments, &index, root) {
        progress
            .on_message(&format!(
                "Resetting base of #{} ({}): {} → {root}",
                reset.pr_number, reset.branch, reset.current_base
            ))
            .await;

        if dry_run {
            index.set_base(&reset.branch, root);
            continue;
        }

        let update = PrUpdate {
            base: Some(root.to_string()),
            body: None,
        };
        let pr = platform.update_pr(reset.pr_number, &update).await?;
        index.replace(&reset.branch, pr.clone());
        result.reset_prs.push(pr);
    }

    progress.on_phase(Phase::Pushing).await;
    result.pushed_branches = push_segments(
        backend,
        &chain.upstream.remote,
        segments,
        progress,
        dry_run,
    )
    .await?;

    progress.on_phase(Phase::CreatingPrs).await;
    for create in plan_creations(segments, &index, root) {
        if dry_run {
            progress
                .on_message(&format!(
                    "Would create PR for {} (base: {}): {}",
                    create.branch, create.base, create.title
                ))
                .await;
            continue;
        }

        info!("Creating request for {} onto {}", create.branch, create.base);
        let pr = platform
            .create_pr(&create.branch, &create.base, &create.title, "")
            .await?;
        progress.on_pr_created(&create.branch, &pr).await;
        index.replace(&create.branch, pr.clone());
        result.created_prs.push(pr);
    }

    progress.on_phase(Phase::UpdatingPrs).await;
    for (idx, segment) in segments.iter().enumerate() {
        let Some(pr) = index.get(&segment.branch) else {
            if dry_run {
                continue;
            }
            return Err(Error::Internal(format!(
                "no open request for {} after creation",
                segment.branch
            )));
        };

        let entries = chain_entries(segments, &index);
        let Some(change) = plan_update(segments, idx, pr, &entries, root) else {
            debug!("#{} ({}) is up to date", pr.number, segment.branch);
            continue;
        };

        if let Some(base) = &change.update.base {
            progress
                .on_message(&format!(
                    "Updating #{} ({}) base: {} → {base}",
                    change.pr_number, change.branch, change.current_base
                ))
                .await;
        }
        if change.update.body.is_some() {
            progress
                .on_message(&format!(
                    "Updating #{} ({}) description",
                    change.pr_number, change.branch
                ))
                .await;
        }

        if dry_run {
            continue;
        }

        let updated = platform.update_pr(change.pr_number, &change.update).await?;
        progress.on_pr_updated(&change.branch, &updated).await;
        index.replace(&change.branch, updated.clone());
        result.updated_prs.push(updated);
    }

    progress.on_phase(Phase::Complete).await;
    result.index = index;
    Ok(result)
}
