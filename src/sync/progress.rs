//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, tests) to receive progress
//! updates while a chain is synchronized.

use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Synchronization phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching open requests from the platform
    Analyzing,
    /// Pointing stale request bases at the root branch
    ResettingBases,
    /// Force-pushing segment branches
    Pushing,
    /// Creating missing requests
    CreatingPrs,
    /// Correcting bases and descriptions
    UpdatingPrs,
    /// Merging the first request
    Merging,
    /// Synchronization complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Analyzing => "Fetching open pull requests",
            Self::ResettingBases => "Resetting stale bases",
            Self::Pushing => "Pushing branches",
            Self::CreatingPrs => "Creating pull requests",
            Self::UpdatingPrs => "Updating pull requests",
            Self::Merging => "Merging",
            Self::Complete => "Done",
        };
        write!(f, "{s}")
    }
}

/// Push operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// Push succeeded; the transport's output
    Success(String),
    /// Push skipped because of a dry run
    DryRun,
    /// Push failed with error message
    Failed(String),
}

impl fmt::Display for PushStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(_) => write!(f, "pushed"),
            Self::DryRun => write!(f, "would push (dry run)"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
///
/// Calls arrive from a single task, so each call may be rendered as one
/// uninterrupted write.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once per branch when its push finishes
    async fn on_branch_push(&self, branch: &str, remote: &str, status: PushStatus);

    /// Called when a PR is created
    async fn on_pr_created(&self, branch: &str, pr: &PullRequest);

    /// Called when a PR is updated
    async fn on_pr_updated(&self, branch: &str, pr: &PullRequest);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_branch_push(&self, _branch: &str, _remote: &str, _status: PushStatus) {}
    async fn on_pr_created(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_pr_updated(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_message(&self, _message: &str) {}
}
