//! Bounded concurrent force-push of segment branches

use crate::chain::Segment;
use crate::error::{Error, Result};
use crate::repo::GitBackend;
use crate::sync::progress::{ProgressCallback, PushStatus};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// Upper bound on simultaneous pushes
pub const MAX_CONCURRENT_PUSHES: usize = 32;

/// Force-push every segment's tip to its branch on `remote`
///
/// Pushes run concurrently, at most [`MAX_CONCURRENT_PUSHES`] at a time.
/// Every push runs to completion even if another fails; failures are
/// reported together afterwards. Nothing is rolled back. Returns the pushed
/// branches in completion order.
pub async fn push_segments(
    backend: Arc<dyn GitBackend>,
    remote: &str,
    segments: &[Segment],
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<Vec<String>> {
    if dry_run {
        for seg in segments {
            progress
                .on_branch_push(&seg.branch, remote, PushStatus::DryRun)
                .await;
        }
        return Ok(Vec::new());
    }

    let mut jobs = segments
        .iter()
        .map(|seg| (seg.branch.clone(), seg.tip().id.clone()));
    let mut tasks: JoinSet<(String, Result<String>)> = JoinSet::new();
    let mut pushed = Vec::new();
    let mut failures = Vec::new();

    loop {
        while tasks.len() < MAX_CONCURRENT_PUSHES {
            let Some((branch, commit)) = jobs.next() else {
                break;
            };
            let backend = Arc::clone(&backend);
            let remote = remote.to_string();
            debug!("Spawning push of {commit} to {remote}/{branch}");
            tasks.spawn(async move {
                let result = backend.force_push(&remote, &commit, &branch).await;
                (branch, result)
            });
        }

        let Some(joined) = tasks.join_next().await else {
            break;
        };
        let (branch, result) =
            joined.map_err(|e| Error::Internal(format!("push task failed: {e}")))?;

        match result {
            Ok(output) => {
                progress
                    .on_branch_push(&branch, remote, PushStatus::Success(output))
                    .await;
                pushed.push(branch);
            }
            Err(e) => {
                progress
                    .on_branch_push(&branch, remote, PushStatus::Failed(e.to_string()))
                    .await;
                failures.push(format!("{branch}: {e}"));
            }
        }
    }

    if failures.is_empty() {
        Ok(pushed)
    } else {
        Err(Error::Git(format!(
            "{} push(es) failed:\n{}",
            failures.len(),
            failures.join("\n")
        )))
    }
}
