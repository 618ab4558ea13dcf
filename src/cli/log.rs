//! Log command - show the chain grouped by branch

use crate::cli::style::{bullet, Stylize};
use crate::cli::{load_chain, GlobalOptions};
use anstream::println;
use git_pr_chain::chain::Run;
use git_pr_chain::error::Result;

/// Run the log command
///
/// Only local data is shown; the hosting service is not contacted.
pub async fn run_log(opts: &GlobalOptions) -> Result<()> {
    let (_repo, chain) = load_chain(opts).await?;
    chain.ensure_not_empty()?;

    let count = chain.commits.len();
    println!(
        "{} is {} commit{} ahead of {}",
        "HEAD".emphasis(),
        count.accent(),
        if count == 1 { "" } else { "s" },
        chain.upstream.accent()
    );

    for run in &chain.runs {
        println!();
        println!("{}", run_header(run));
        for commit in &run.commits {
            println!(
                "  {} {} {}",
                bullet(),
                commit.short_id().muted(),
                commit.headline()
            );
        }
    }

    Ok(())
}

fn run_header(run: &Run) -> String {
    match &run.branch {
        Some(branch) => format!("Branch {}", branch.accent()),
        None if run.commits.iter().any(|c| c.stop) => {
            "Will not be pushed; remove STOP".warn().for_stdout().to_string()
        }
        None => "No branch; will not be pushed".muted().to_string(),
    }
}
