//! Managed region of pull request descriptions
//!
//! Everything between [`REGION_START`] and [`REGION_END`] belongs to
//! git-pr-chain and is rewritten on every push; text outside the region is
//! left alone.

use crate::chain::Segment;
use std::fmt::Write;

/// Opening sentinel of the managed region
pub const REGION_START: &str = "<git-pr-chain>";
/// Closing sentinel of the managed region
pub const REGION_END: &str = "</git-pr-chain>";
/// Marker placed around the current request in the chain list
pub const YOU_ARE_HERE: &str = "👈 **YOU ARE HERE**";

const PROJECT_URL: &str = "https://github.com/jlebar/git-pr-chain";

/// One line of the chain list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry<'a> {
    /// Head branch
    pub branch: &'a str,
    /// Request number, `None` if not created yet
    pub number: Option<u64>,
    /// Request title
    pub title: &'a str,
}

/// Render the managed region for `segment`, the `current`-th chain entry
pub fn render_region(segment: &Segment, entries: &[ChainEntry<'_>], current: usize, root: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REGION_START}");
    let _ = writeln!(out);
    let _ = writeln!(out, "#### Commits in this PR");
    for commit in &segment.commits {
        let msg = commit.message_without_trailers().replace('\n', "\n    ");
        let _ = writeln!(out, "1. {msg}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "#### [PR chain]({PROJECT_URL})");
    for (i, entry) in entries.iter().enumerate() {
        let line = match entry.number {
            Some(n) => format!("#{n} {}", entry.title),
            None => format!("(new) {}", entry.title),
        };
        if i == current {
            let _ = writeln!(out, "1. 👉 {line} {YOU_ARE_HERE}");
        } else {
            let _ = writeln!(out, "1. {line}");
        }
    }

    if current > 0 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "⚠️⚠️ Please **do not click the green \"merge\" button** unless you know what \
             you're doing.  This PR is part of a chain of PRs, and clicking the merge \
             button will not merge it into {root}. ⚠️⚠️"
        );
    }

    let _ = writeln!(out);
    let _ = write!(out, "{REGION_END}");
    out
}

/// Byte range of the managed region in `body`, sentinels included
///
/// The region is the first closing sentinel that has an opening sentinel
/// before it, paired with the nearest such opening sentinel. Stray sentinels
/// in user text are never part of a region.
fn find_region(body: &str) -> Option<(usize, usize)> {
    body.match_indices(REGION_END).find_map(|(end, _)| {
        body[..end]
            .rfind(REGION_START)
            .map(|start| (start, end + REGION_END.len()))
    })
}

/// Replace the managed region of `body` with `region`
///
/// A body without a closed region gets one appended, and none of its text is
/// consumed. Text before the region is separated from it by exactly one blank
/// line, so splicing the same region twice is a no-op.
pub fn splice_region(body: &str, region: &str) -> String {
    let (before, after) = match find_region(body) {
        Some((start, end)) => (&body[..start], &body[end..]),
        None => (body, ""),
    };

    let before = before.trim_end();
    if before.is_empty() {
        format!("{region}{after}")
    } else {
        format!("{before}\n\n{region}{after}")
    }
}
