//! Adjacency runs and pushable segments

use crate::chain::commit::CommitRecord;

/// A maximal run of consecutive commits with the same resolved branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Shared branch, `None` for unannotated or stopped commits
    pub branch: Option<String>,
    /// Commits in this run, oldest first (never empty)
    pub commits: Vec<CommitRecord>,
}

/// A run destined for one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Branch pushed to the remote
    pub branch: String,
    /// Commits in this segment, oldest first (never empty)
    pub commits: Vec<CommitRecord>,
}

impl Segment {
    /// Newest commit; what the branch is pushed to
    pub fn tip(&self) -> &CommitRecord {
        self.commits
            .last()
            .expect("segments are built from non-empty runs")
    }

    /// Pull request title guessed from the first commit
    pub fn title(&self) -> &str {
        self.commits
            .first()
            .map(CommitRecord::headline)
            .unwrap_or_default()
    }
}

/// Collapse commits into runs by equality of consecutive resolved branches
pub fn adjacency_runs(commits: &[CommitRecord]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();

    for commit in commits {
        match runs.last_mut() {
            Some(run) if run.branch == commit.branch => run.commits.push(commit.clone()),
            _ => runs.push(Run {
                branch: commit.branch.clone(),
                commits: vec![commit.clone()],
            }),
        }
    }

    runs
}

/// Drop runs without a branch, keeping chain order
pub fn group_segments(runs: &[Run]) -> Vec<Segment> {
    runs.iter()
        .filter_map(|run| {
            let branch = run.branch.clone()?;
            if run.commits.first().is_none_or(|c| c.stop) {
                return None;
            }
            Some(Segment {
                branch,
                commits: run.commits.clone(),
            })
        })
        .collect()
}

/// Base a segment's pull request should have: the previous segment's branch,
/// or `root` for the first segment
pub fn desired_base<'a>(segments: &'a [Segment], idx: usize, root: &'a str) -> &'a str {
    match idx.checked_sub(1) {
        Some(prev) => &segments[prev].branch,
        None => root,
    }
}
