//! Platform services for GitHub and GitLab
//!
//! Provides a unified interface for PR/MR operations across platforms.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{detect_platform, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{MergeMethod, MergeOutcome, PlatformConfig, PrUpdate, PullRequest};
use async_trait::async_trait;

/// Platform service trait for PR/MR operations
///
/// This trait abstracts GitHub and GitLab operations, allowing the same
/// synchronization logic to work with either platform.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// All open PRs in the repository
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>>;

    /// Create a new PR
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Change the base and/or description of an existing PR
    async fn update_pr(&self, pr_number: u64, update: &PrUpdate) -> Result<PullRequest>;

    /// Merge a PR
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeOutcome>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
