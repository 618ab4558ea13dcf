//! git-pr-chain - Chains of dependent GitHub & GitLab pull requests
//!
//! CLI binary; usable as `git pr-chain` when on `PATH`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use git_pr_chain::types::MergeMethod;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "git-pr-chain")]
#[command(about = "Manage chains of dependent pull requests from commit trailers")]
#[command(version)]
struct Cli {
    /// Log every git and API call
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show what would be done without pushing or editing pull requests
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Path to git repository (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    path: Option<PathBuf>,

    /// Prefix for branch names (overrides `git config pr-chain.branch-prefix`)
    #[arg(long, global = true)]
    branch_prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the commits in the chain and the branches they belong to
    Log,

    /// Push every branch and create or update its pull request
    Push,

    /// Push, then merge the first pull request of the chain
    Merge {
        /// How the pull request is merged
        #[arg(long, value_enum, default_value_t = MergeMethodArg::Merge)]
        merge_method: MergeMethodArg,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Do not `git pull --rebase` after merging
        #[arg(long)]
        no_pull: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MergeMethodArg {
    Merge,
    Squash,
    Rebase,
}

impl From<MergeMethodArg> for MergeMethod {
    fn from(arg: MergeMethodArg) -> Self {
        match arg {
            MergeMethodArg::Merge => Self::Merge,
            MergeMethodArg::Squash => Self::Squash,
            MergeMethodArg::Rebase => Self::Rebase,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "git_pr_chain=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = cli::GlobalOptions {
        path: cli.path.unwrap_or_else(|| PathBuf::from(".")),
        branch_prefix: cli.branch_prefix,
        dry_run: cli.dry_run,
    };

    let outcome = match cli.command {
        Commands::Log => cli::run_log(&opts).await,
        Commands::Push => cli::run_push(&opts).await,
        Commands::Merge {
            merge_method,
            yes,
            no_pull,
        } => cli::run_merge(&opts, merge_method.into(), yes, !no_pull).await,
    };

    outcome.map_err(|err| {
        if err.is_internal() {
            anyhow::Error::new(err).context("internal error, this is probably a bug in git-pr-chain")
        } else {
            err.into()
        }
    })
}
