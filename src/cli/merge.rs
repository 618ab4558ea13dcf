//! Merge command - push, then merge the bottom pull request of the chain

use crate::cli::push::push_chain;
use crate::cli::style::{bullet, check, cross, hyperlink_url, Stream, Stylize};
use crate::cli::GlobalOptions;
use anstream::{eprintln, println};
use dialoguer::Confirm;
use git_pr_chain::chain::Segment;
use git_pr_chain::error::{Error, Result};
use git_pr_chain::repo::GitBackend;
use git_pr_chain::sync::{first_request, merge_first};
use git_pr_chain::types::{MergeMethod, PullRequest};

/// Run the merge command
pub async fn run_merge(
    opts: &GlobalOptions,
    method: MergeMethod,
    yes: bool,
    pull: bool,
) -> Result<()> {
    let pushed = push_chain(opts).await?;
    let segments = &pushed.chain.segments;

    if opts.dry_run {
        match first_request(segments, &pushed.result.index) {
            Ok(pr) => println!("Would merge #{} ({}) with {method}", pr.number, pr.head_ref),
            Err(_) => println!(
                "Would merge the pull request for {} with {method}",
                segments[0].branch
            ),
        }
        return Ok(());
    }

    let pr = first_request(segments, &pushed.result.index)?;
    println!();
    println!(
        "{}",
        merge_header(pr, &segments[0], pushed.chain.root_branch())
    );

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Merge this pull request?")
            .default(false)
            .interact()
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        if !confirmed {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
    }

    let (pr, outcome) = merge_first(
        segments,
        &pushed.result.index,
        pushed.platform.as_ref(),
        method,
    )
    .await?;

    if !outcome.merged {
        eprintln!(
            "{} Merging #{} failed: {}",
            cross(),
            pr.number,
            outcome.message.as_deref().unwrap_or("no reason given").error()
        );
        return Err(Error::Platform(format!(
            "pull request #{} was not merged",
            pr.number
        )));
    }
    println!("{} {} #{}", check(), "Merged".success(), pr.number);

    if pull {
        let upstream = &pushed.chain.upstream;
        println!("Pulling {}...", upstream.accent());
        pushed
            .repo
            .pull_rebase(&upstream.remote, &upstream.branch)
            .await?;
        println!("{} Rebased onto {}", check(), upstream.accent());
    }

    Ok(())
}

/// "Merging #N" line, the request link, then one line per commit
fn merge_header(pr: &PullRequest, segment: &Segment, root: &str) -> String {
    let mut lines = vec![
        format!(
            "Merging {} {} into {}",
            format!("#{}", pr.number).accent(),
            pr.title.emphasis(),
            root.accent()
        ),
        format!("  {}", hyperlink_url(Stream::Stdout, &pr.html_url)),
    ];
    lines.extend(
        segment
            .commits
            .iter()
            .map(|commit| format!("  {} {}", bullet(), commit.short_desc())),
    );
    lines.join("\n")
}
