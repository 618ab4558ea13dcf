//! CLI commands
//!
//! Command implementations for the `git-pr-chain` binary.

mod log;
mod merge;
mod progress;
mod push;
mod style;

pub use log::run_log;
pub use merge::run_merge;
pub use push::run_push;

use git_pr_chain::chain::{branch_prefix, build_chain, Chain};
use git_pr_chain::error::Result;
use git_pr_chain::platform::{create_platform_service, parse_repo_info, PlatformService};
use git_pr_chain::repo::{GitBackend, GitRepo};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Options shared by every subcommand
pub struct GlobalOptions {
    /// Repository path
    pub path: PathBuf,
    /// Branch prefix given on the command line
    pub branch_prefix: Option<String>,
    /// Suppress pushes and pull request edits
    pub dry_run: bool,
}

/// Open the repository and derive its chain
async fn load_chain(opts: &GlobalOptions) -> Result<(Arc<GitRepo>, Chain)> {
    let repo = Arc::new(GitRepo::open(&opts.path).await?);
    let prefix = branch_prefix(repo.as_ref(), opts.branch_prefix.as_deref()).await?;
    let chain = build_chain(repo.as_ref(), &prefix).await?;
    Ok((repo, chain))
}

/// Connect to the hosting service of the chain's upstream remote
async fn connect_platform(
    backend: &dyn GitBackend,
    chain: &Chain,
) -> Result<Box<dyn PlatformService>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style::spinner_style());
    spinner.set_message(format!("Connecting to {}...", chain.upstream.remote));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let connected = async {
        let url = backend.remote_url(&chain.upstream.remote).await?;
        let config = parse_repo_info(&url)?;
        create_platform_service(&config).await
    }
    .await;

    spinner.finish_and_clear();
    connected
}
