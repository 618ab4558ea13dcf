//! Push command - push every branch and synchronize its pull request

use crate::cli::progress::CliProgress;
use crate::cli::style::{check, Stylize};
use crate::cli::{connect_platform, load_chain, GlobalOptions};
use anstream::println;
use git_pr_chain::chain::Chain;
use git_pr_chain::error::{Error, Result};
use git_pr_chain::platform::PlatformService;
use git_pr_chain::repo::{GitBackend, GitRepo};
use git_pr_chain::sync::{sync_chain, SyncResult};
use std::sync::Arc;

/// Everything a synchronized chain leaves behind for follow-up commands
pub struct Pushed {
    pub repo: Arc<GitRepo>,
    pub chain: Chain,
    pub platform: Box<dyn PlatformService>,
    pub result: SyncResult,
}

/// Derive the chain and synchronize it with the hosting service
pub async fn push_chain(opts: &GlobalOptions) -> Result<Pushed> {
    let (repo, chain) = load_chain(opts).await?;
    chain.ensure_not_empty()?;
    if chain.segments.is_empty() {
        return Err(Error::NoSegments);
    }

    println!(
        "Pushing {} branch{} onto {}:",
        chain.segments.len().accent(),
        if chain.segments.len() == 1 { "" } else { "es" },
        chain.upstream.accent()
    );
    for segment in &chain.segments {
        println!(
            "  - {} ({} commit{})",
            segment.branch.accent(),
            segment.commits.len(),
            if segment.commits.len() == 1 { "" } else { "s" }
        );
    }
    println!();

    let platform = connect_platform(repo.as_ref(), &chain).await?;
    let backend: Arc<dyn GitBackend> = repo.clone();
    let result = sync_chain(
        &chain,
        backend,
        platform.as_ref(),
        &CliProgress::new(),
        opts.dry_run,
    )
    .await?;

    Ok(Pushed {
        repo,
        chain,
        platform,
        result,
    })
}

/// Run the push command
pub async fn run_push(opts: &GlobalOptions) -> Result<()> {
    let pushed = push_chain(opts).await?;
    if !opts.dry_run {
        print_summary(&pushed.result);
    }
    Ok(())
}

fn print_summary(result: &SyncResult) {
    println!();
    println!(
        "{} Pushed {} branch{}, created {} and updated {} pull request{}",
        check(),
        result.pushed_branches.len().accent(),
        if result.pushed_branches.len() == 1 { "" } else { "es" },
        result.created_prs.len().accent(),
        result.updated_prs.len().accent(),
        if result.created_prs.len() + result.updated_prs.len() == 1 {
            ""
        } else {
            "s"
        }
    );
}
