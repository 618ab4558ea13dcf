//! Git backend
//!
//! Read-only access to the commit graph plus the push transport. The chain
//! engine only talks to git through [`GitBackend`], so tests can substitute an
//! in-memory repository.

mod git;

pub use git::GitRepo;

use crate::error::Result;
use crate::types::UpstreamRef;
use async_trait::async_trait;

/// Git operations consumed by git-pr-chain
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Resolve the upstream tracked by `branch` (`HEAD` for the current branch)
    ///
    /// Fails with [`crate::error::Error::NoUpstream`] when none is configured.
    async fn tracked_upstream(&self, branch: &str) -> Result<UpstreamRef>;

    /// Commit IDs reachable from `to` but not from `from`, oldest first
    async fn list_commits(&self, from: &str, to: &str) -> Result<Vec<String>>;

    /// Full commit message
    async fn commit_message(&self, id: &str) -> Result<String>;

    /// Number of parents of a commit
    async fn parent_count(&self, id: &str) -> Result<usize>;

    /// Read a git config value, `None` if unset
    async fn config_value(&self, key: &str) -> Result<Option<String>>;

    /// URL of a remote
    async fn remote_url(&self, remote: &str) -> Result<String>;

    /// Force-push `commit` to `refs/heads/<branch>` on `remote`
    ///
    /// Returns the transport's output.
    async fn force_push(&self, remote: &str, commit: &str, branch: &str) -> Result<String>;

    /// `git pull --rebase <remote> <branch>`
    async fn pull_rebase(&self, remote: &str, branch: &str) -> Result<()>;
}
