//! In-memory git backend for testing

use crate::common::Journal;
use async_trait::async_trait;
use git_pr_chain::error::{Error, Result};
use git_pr_chain::repo::GitBackend;
use git_pr_chain::types::UpstreamRef;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A single commit of the fake history
#[derive(Debug, Clone)]
struct FakeCommit {
    id: String,
    message: String,
    parents: usize,
}

/// Call record for `force_push`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCall {
    pub remote: String,
    pub commit: String,
    pub branch: String,
}

/// Linear history on top of an upstream, built commit by commit
///
/// Features:
/// - Deterministic commit IDs (`c000…0`, `c000…1`, …)
/// - Push tracking and per-branch push failures
/// - Optional shared [`Journal`] for ordering assertions
pub struct FakeRepo {
    upstream: Option<UpstreamRef>,
    commits: Vec<FakeCommit>,
    config: HashMap<String, String>,
    remotes: HashMap<String, String>,
    journal: Journal,
    pushes: Mutex<Vec<PushCall>>,
    pulls: Mutex<Vec<(String, String)>>,
    failing_pushes: Mutex<HashSet<String>>,
}

impl FakeRepo {
    /// A repository tracking `upstream` (e.g. `origin/main`)
    pub fn tracking(upstream: &str) -> Self {
        Self {
            upstream: UpstreamRef::parse(upstream),
            commits: Vec::new(),
            config: HashMap::new(),
            remotes: HashMap::from([(
                "origin".to_string(),
                "git@github.com:test/repo.git".to_string(),
            )]),
            journal: Journal::default(),
            pushes: Mutex::new(Vec::new()),
            pulls: Mutex::new(Vec::new()),
            failing_pushes: Mutex::new(HashSet::new()),
        }
    }

    /// A repository whose current branch tracks nothing
    pub fn untracked() -> Self {
        Self {
            upstream: None,
            ..Self::tracking("origin/main")
        }
    }

    /// Append a commit with `message`
    #[must_use]
    pub fn commit(self, message: &str) -> Self {
        self.commit_with_parents(message, 1)
    }

    /// Append a merge commit
    #[must_use]
    pub fn merge_commit(self, message: &str) -> Self {
        self.commit_with_parents(message, 2)
    }

    fn commit_with_parents(mut self, message: &str, parents: usize) -> Self {
        let id = format!("c{:039}", self.commits.len());
        self.commits.push(FakeCommit {
            id,
            message: message.to_string(),
            parents,
        });
        self
    }

    /// Set a git config value
    #[must_use]
    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    /// Share a journal with other fakes
    #[must_use]
    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    /// Make pushes of `branch` fail
    pub fn fail_push(&self, branch: &str) {
        self.failing_pushes
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    /// ID of the `idx`-th commit, oldest first
    pub fn id(&self, idx: usize) -> String {
        self.commits[idx].id.clone()
    }

    /// All `force_push` calls, sorted by branch
    pub fn get_pushes(&self) -> Vec<PushCall> {
        let mut pushes = self.pushes.lock().unwrap().clone();
        pushes.sort_by(|a, b| a.branch.cmp(&b.branch));
        pushes
    }

    /// All `pull_rebase` calls
    pub fn get_pulls(&self) -> Vec<(String, String)> {
        self.pulls.lock().unwrap().clone()
    }

    fn find(&self, id: &str) -> Result<&FakeCommit> {
        self.commits
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::Git(format!("bad object {id}")))
    }
}

#[async_trait]
impl GitBackend for FakeRepo {
    async fn tracked_upstream(&self, branch: &str) -> Result<UpstreamRef> {
        self.upstream
            .clone()
            .ok_or_else(|| Error::NoUpstream(branch.to_string()))
    }

    async fn list_commits(&self, _from: &str, _to: &str) -> Result<Vec<String>> {
        // Blank entries mimic stray newlines in `git log` output
        let mut ids: Vec<String> = self.commits.iter().map(|c| c.id.clone()).collect();
        ids.push(String::new());
        Ok(ids)
    }

    async fn commit_message(&self, id: &str) -> Result<String> {
        Ok(self.find(id)?.message.clone())
    }

    async fn parent_count(&self, id: &str) -> Result<usize> {
        Ok(self.find(id)?.parents)
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(key).cloned())
    }

    async fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes
            .get(remote)
            .cloned()
            .ok_or_else(|| Error::Git(format!("no such remote '{remote}'")))
    }

    async fn force_push(&self, remote: &str, commit: &str, branch: &str) -> Result<String> {
        self.journal.record(format!("push {branch}"));
        self.pushes.lock().unwrap().push(PushCall {
            remote: remote.to_string(),
            commit: commit.to_string(),
            branch: branch.to_string(),
        });

        if self.failing_pushes.lock().unwrap().contains(branch) {
            return Err(Error::Git(format!("failed to push some refs to '{remote}'")));
        }
        Ok(format!(" + {commit} -> {branch} (forced update)"))
    }

    async fn pull_rebase(&self, remote: &str, branch: &str) -> Result<()> {
        self.pulls
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }
}
