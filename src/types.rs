//! Core types for git-pr-chain

use serde::{Deserialize, Serialize};
use std::fmt;

/// The upstream a local branch tracks, e.g. `origin/main`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRef {
    /// Remote name (e.g., "origin")
    pub remote: String,
    /// Branch name on the remote; the root of the chain
    pub branch: String,
}

impl UpstreamRef {
    /// Parse the short form `remote/branch`.
    ///
    /// Only the first `/` separates the remote, so `origin/release/1.0`
    /// tracks branch `release/1.0`.
    pub fn parse(short: &str) -> Option<Self> {
        let (remote, branch) = short.split_once('/')?;
        if remote.is_empty() || branch.is_empty() {
            return None;
        }
        Some(Self {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }
}

impl fmt::Display for UpstreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remote, self.branch)
    }
}

/// A pull request / merge request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR/MR number
    pub number: u64,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR/MR title
    pub title: String,
    /// PR/MR description
    pub body: String,
}

/// Fields to change on an existing pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrUpdate {
    /// New base branch
    pub base: Option<String>,
    /// New description
    pub body: Option<String>,
}

impl PrUpdate {
    /// True when the update would not change anything
    pub const fn is_empty(&self) -> bool {
        self.base.is_none() && self.body.is_none()
    }
}

/// How a pull request gets merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMethod {
    /// Merge commit
    #[default]
    Merge,
    /// Squash into one commit
    Squash,
    /// Rebase onto the base branch
    Rebase,
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Result of a merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Whether the platform merged the request
    pub merged: bool,
    /// Message returned by the platform
    pub message: Option<String>,
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}
