//! Test data factories for git-pr-chain types

use git_pr_chain::types::{Platform, PlatformConfig, PullRequest};

/// Create an open pull request
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: format!("PR for {head}"),
        body: String::new(),
    }
}

/// Create a GitHub platform config
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitHub,
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Commit message declaring `branch`
pub fn on_branch(subject: &str, branch: &str) -> String {
    format!("{subject}\n\nSome details.\n\ngit-pr-chain: {branch}\n")
}

/// Commit message carrying a STOP marker
pub fn stopped(subject: &str) -> String {
    format!("{subject}\n\ngit-pr-chain: STOP\n")
}
