//! Error types for git-pr-chain

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by git-pr-chain
#[derive(Debug, Error)]
pub enum Error {
    /// The current branch has no tracked upstream
    #[error(
        "no upstream branch is tracked by {0}; set one with e.g. `git branch --set-upstream-to origin/main`"
    )]
    NoUpstream(String),

    /// No commits between the upstream and the tip
    #[error("no commits in branch; is the upstream branch ({0}) set correctly?")]
    EmptyChain(String),

    /// Chain has commits but none of them belong to a pushable branch
    #[error("no commits to push; add a `git-pr-chain: <branch>` trailer to a commit message")]
    NoSegments,

    /// History contains merge commits
    #[error(
        "history contains merge commit(s):\n{}\nmerges are incompatible with git-pr-chain; rewrite your branch to a linear history",
        bullet_list(.0)
    )]
    MergeCommits(Vec<String>),

    /// Commits carrying more than one branch trailer
    #[error(
        "commit(s) have multiple git-pr-chain lines:\n{}\nrewrite history and keep one per commit",
        bullet_list(.0)
    )]
    DuplicateTrailers(Vec<String>),

    /// Branches that appear, are interrupted by another branch, then reappear
    #[error(
        "branch(es) appear, are interrupted by a different branch, then reappear (AABA):\n{}\nreorder commits or change their branch trailers",
        bullet_list(.0)
    )]
    RepeatedBranches(Vec<String>),

    /// Commits without a branch strictly inside the chain
    #[error(
        "unable to infer branches for commit(s):\n{}\nthis should not happen and is probably a bug in git-pr-chain",
        bullet_list(.0)
    )]
    OrphanRun(Vec<String>),

    /// Branches with more than one open pull request
    #[error(
        "branch(es) have multiple open pull requests, don't know which to choose:\n{}",
        bullet_list(.0)
    )]
    AmbiguousRequests(Vec<String>),

    /// A git subprocess failed
    #[error("git error: {0}")]
    Git(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// No GitHub or GitLab remote could be recognized
    #[error("remote is not a supported GitHub or GitLab repository")]
    NoSupportedRemotes,

    /// Generic platform error
    #[error("platform error: {0}")]
    Platform(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Broken internal invariant
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error indicates a defect rather than bad input or a
    /// failing transport
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::OrphanRun(_) | Self::Internal(_))
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
