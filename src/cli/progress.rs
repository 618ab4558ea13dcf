//! CLI progress callback with styled output

use crate::cli::style::{check, cross, hyperlink_url, indent_block, Stream, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use git_pr_chain::sync::{Phase, ProgressCallback, PushStatus};
use git_pr_chain::types::PullRequest;

/// Prints synchronization progress to stdout, errors to stderr
///
/// Each callback renders with a single `println!`, so lines from concurrent
/// pushes never interleave.
pub struct CliProgress;

impl CliProgress {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => {}
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_branch_push(&self, branch: &str, remote: &str, status: PushStatus) {
        match &status {
            PushStatus::Success(output) => {
                let output = indent_block(output, "    ");
                if output.is_empty() {
                    println!("  {} Pushed {}/{}", check(), remote, branch.accent());
                } else {
                    println!(
                        "  {} Pushed {}/{}\n{}",
                        check(),
                        remote,
                        branch.accent(),
                        output.muted()
                    );
                }
            }
            PushStatus::DryRun => {
                println!(
                    "  {} {}/{} {}",
                    "-".muted(),
                    remote,
                    branch.accent(),
                    status.to_string().muted()
                );
            }
            PushStatus::Failed(_) => {
                eprintln!(
                    "  {} Failed to push {}: {}",
                    cross(),
                    branch.accent().for_stderr(),
                    status.to_string().error()
                );
            }
        }
    }

    async fn on_pr_created(&self, branch: &str, pr: &PullRequest) {
        println!(
            "  {} Created PR {} for {}\n    {}",
            check(),
            format!("#{}", pr.number).accent(),
            branch.emphasis(),
            hyperlink_url(Stream::Stdout, &pr.html_url)
        );
    }

    async fn on_pr_updated(&self, branch: &str, pr: &PullRequest) {
        println!(
            "  {} Updated PR {} for {}",
            check(),
            format!("#{}", pr.number).accent(),
            branch.emphasis()
        );
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
