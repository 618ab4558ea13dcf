//! Structural checks on a resolved chain

use crate::chain::commit::CommitRecord;
use crate::chain::segments::{adjacency_runs, Run};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Validate a resolved chain and return its adjacency runs
///
/// Rejects, reporting every offender:
/// - merge commits anywhere in the chain
/// - a branch that appears in more than one run ("AABA")
/// - a run without a branch other than the first or last (internal error)
pub fn validate_chain(commits: &[CommitRecord]) -> Result<Vec<Run>> {
    let merges: Vec<String> = commits
        .iter()
        .filter(|c| c.is_merge)
        .map(CommitRecord::short_desc)
        .collect();
    if !merges.is_empty() {
        return Err(Error::MergeCommits(merges));
    }

    let runs = adjacency_runs(commits);

    let mut run_counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for branch in runs.iter().filter_map(|r| r.branch.as_deref()) {
        let count = run_counts.entry(branch).or_insert(0);
        if *count == 0 {
            order.push(branch);
        }
        *count += 1;
    }
    let repeated: Vec<String> = order
        .into_iter()
        .filter(|b| run_counts[b] > 1)
        .map(ToString::to_string)
        .collect();
    if !repeated.is_empty() {
        return Err(Error::RepeatedBranches(repeated));
    }

    if runs.len() > 2 {
        let orphans: Vec<String> = runs[1..runs.len() - 1]
            .iter()
            .filter(|r| r.branch.is_none())
            .flat_map(|r| r.commits.iter().map(CommitRecord::short_desc))
            .collect();
        if !orphans.is_empty() {
            return Err(Error::OrphanRun(orphans));
        }
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, branch: Option<&str>, parents: usize) -> CommitRecord {
        let mut c = CommitRecord::new(id, None, &format!("commit {id}"), parents);
        c.branch = branch.map(ToString::to_string);
        c
    }

    #[test]
    fn test_valid_chain_returns_runs() {
        let commits = vec![
            commit("a", Some("x"), 1),
            commit("b", Some("x"), 1),
            commit("c", Some("y"), 1),
        ];
        let runs = validate_chain(&commits).unwrap();
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_merge_commits_all_reported() {
        let commits = vec![
            commit("a", Some("x"), 2),
            commit("b", Some("x"), 1),
            commit("c", Some("y"), 3),
        ];
        match validate_chain(&commits).unwrap_err() {
            Error::MergeCommits(list) => {
                assert_eq!(list, vec!["a commit a".to_string(), "c commit c".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_aaba_rejected() {
        let commits = vec![
            commit("a", Some("x"), 1),
            commit("b", Some("y"), 1),
            commit("c", Some("x"), 1),
        ];
        match validate_chain(&commits).unwrap_err() {
            Error::RepeatedBranches(list) => assert_eq!(list, vec!["x".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_runs_allowed_at_edges() {
        let commits = vec![
            commit("a", None, 1),
            commit("b", Some("x"), 1),
            commit("c", None, 1),
        ];
        assert_eq!(validate_chain(&commits).unwrap().len(), 3);
    }

    #[test]
    fn test_null_run_in_middle_is_internal_error() {
        let commits = vec![
            commit("a", Some("x"), 1),
            commit("b", None, 1),
            commit("c", Some("y"), 1),
        ];
        let err = validate_chain(&commits).unwrap_err();
        assert!(err.is_internal());
        match err {
            Error::OrphanRun(list) => assert_eq!(list, vec!["b commit b".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
