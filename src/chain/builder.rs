//! Chain builder
//!
//! Extracts the commits between the tracked upstream and the tip, then
//! resolves the branch each commit belongs to.

use crate::chain::commit::CommitRecord;
use crate::chain::segments::{group_segments, Run, Segment};
use crate::chain::validate::validate_chain;
use crate::error::{Error, Result};
use crate::repo::GitBackend;
use crate::types::UpstreamRef;
use tracing::debug;

/// Git config key holding the branch prefix
pub const BRANCH_PREFIX_CONFIG_KEY: &str = "pr-chain.branch-prefix";

/// A validated chain
#[derive(Debug, Clone)]
pub struct Chain {
    /// Upstream the chain is based on
    pub upstream: UpstreamRef,
    /// All commits, oldest first, with resolved branches
    pub commits: Vec<CommitRecord>,
    /// Adjacency runs, including runs without a branch
    pub runs: Vec<Run>,
    /// Pushable segments, oldest first
    pub segments: Vec<Segment>,
}

impl Chain {
    /// Root branch the first segment is based on
    pub fn root_branch(&self) -> &str {
        &self.upstream.branch
    }

    /// Fail with [`Error::EmptyChain`] if there are no commits past the upstream
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.commits.is_empty() {
            return Err(Error::EmptyChain(self.upstream.to_string()));
        }
        Ok(())
    }
}

/// Extract the chain between the upstream tracked by `tip` and `tip`
///
/// Fails with [`Error::NoUpstream`] if `tip` tracks nothing.
pub async fn extract_chain(
    backend: &dyn GitBackend,
    tip: &str,
) -> Result<(UpstreamRef, Vec<CommitRecord>)> {
    let upstream = backend.tracked_upstream(tip).await?;
    debug!("Chain is based on {upstream}");

    let ids = backend.list_commits(&upstream.to_string(), tip).await?;

    let mut commits: Vec<CommitRecord> = Vec::with_capacity(ids.len());
    for id in ids.iter().filter(|id| !id.trim().is_empty()) {
        let message = backend.commit_message(id).await?;
        let parent_count = backend.parent_count(id).await?;
        let parent = commits.len().checked_sub(1);
        commits.push(CommitRecord::new(id, parent, &message, parent_count));
    }

    debug!("Extracted {} commits", commits.len());
    Ok((upstream, commits))
}

/// Resolve `stop` and `branch` for every commit, in chain order
///
/// STOP is sticky: once set, every later commit is stopped and has no
/// branch. Otherwise a commit's own trailer wins, else the parent's branch
/// carries forward. `prefix` is prepended to declared branch names.
pub fn resolve_branches(commits: &mut [CommitRecord], prefix: &str) -> Result<()> {
    let duplicates: Vec<String> = commits
        .iter()
        .filter(|c| c.has_duplicate_trailers())
        .map(CommitRecord::short_desc)
        .collect();
    if !duplicates.is_empty() {
        return Err(Error::DuplicateTrailers(duplicates));
    }

    for idx in 0..commits.len() {
        let (parent_stop, parent_branch) = match commits[idx].parent {
            Some(p) => (commits[p].stop, commits[p].branch.clone()),
            None => (false, None),
        };

        let commit = &mut commits[idx];
        commit.stop = parent_stop || commit.has_stop_marker();
        commit.branch = if commit.stop {
            None
        } else if let Some(declared) = commit.declared_branch() {
            Some(format!("{prefix}{declared}"))
        } else {
            parent_branch
        };

        debug!(
            "  {} -> {}",
            commit.short_id(),
            commit.branch.as_deref().unwrap_or(if commit.stop {
                "(stopped)"
            } else {
                "(none)"
            })
        );
    }

    Ok(())
}

/// Resolve the branch prefix: explicit value, else git config, else empty
pub async fn branch_prefix(backend: &dyn GitBackend, explicit: Option<&str>) -> Result<String> {
    if let Some(prefix) = explicit {
        return Ok(prefix.to_string());
    }
    Ok(backend
        .config_value(BRANCH_PREFIX_CONFIG_KEY)
        .await?
        .unwrap_or_default())
}

/// Extract, resolve, validate and group the chain ending at `HEAD`
pub async fn build_chain(backend: &dyn GitBackend, prefix: &str) -> Result<Chain> {
    let (upstream, mut commits) = extract_chain(backend, "HEAD").await?;
    resolve_branches(&mut commits, prefix)?;
    let runs = validate_chain(&commits)?;
    let segments = group_segments(&runs);

    debug!(
        "Chain has {} runs, {} pushable segments",
        runs.len(),
        segments.len()
    );

    Ok(Chain {
        upstream,
        commits,
        runs,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(messages: &[&str]) -> Vec<CommitRecord> {
        messages
            .iter()
            .enumerate()
            .map(|(i, msg)| {
                CommitRecord::new(&format!("{i:040}"), i.checked_sub(1), msg, 1)
            })
            .collect()
    }

    fn branches(commits: &[CommitRecord]) -> Vec<Option<&str>> {
        commits.iter().map(|c| c.branch.as_deref()).collect()
    }

    #[test]
    fn test_branch_carries_forward() {
        let mut commits = chain_of(&["A\n\nGPC: feat1", "B", "C\n\nGPC: feat2", "D"]);
        resolve_branches(&mut commits, "").unwrap();
        assert_eq!(
            branches(&commits),
            vec![Some("feat1"), Some("feat1"), Some("feat2"), Some("feat2")]
        );
    }

    #[test]
    fn test_stop_is_sticky() {
        let mut commits = chain_of(&[
            "A\n\nGPC: feat1",
            "B\n\nGPC: STOP",
            "C\n\nGPC: feat2",
            "D",
        ]);
        resolve_branches(&mut commits, "").unwrap();
        assert_eq!(branches(&commits), vec![Some("feat1"), None, None, None]);
        assert!(!commits[0].stop);
        assert!(commits[1..].iter().all(|c| c.stop));
    }

    #[test]
    fn test_unannotated_prefix_has_no_branch() {
        let mut commits = chain_of(&["A", "B\n\nGPC: feat1"]);
        resolve_branches(&mut commits, "").unwrap();
        assert_eq!(branches(&commits), vec![None, Some("feat1")]);
    }

    #[test]
    fn test_prefix_applied_to_declared_and_inherited() {
        let mut commits = chain_of(&["A\n\nGPC: feat1", "B"]);
        resolve_branches(&mut commits, "me/").unwrap();
        assert_eq!(branches(&commits), vec![Some("me/feat1"), Some("me/feat1")]);
    }

    #[test]
    fn test_duplicate_trailers_reports_all() {
        let mut commits = chain_of(&["A\n\nGPC: a\nGPC: b", "B", "C\n\nGPC: c\nGPC: d"]);
        let err = resolve_branches(&mut commits, "").unwrap_err();
        match err {
            Error::DuplicateTrailers(list) => assert_eq!(list.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
