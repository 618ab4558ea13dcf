//! Open pull requests grouped by head branch

use crate::chain::Segment;
use crate::error::{Error, Result};
use crate::types::PullRequest;
use std::collections::HashMap;

/// Mutable index of open pull requests keyed by head branch
///
/// Built once from the platform, then updated in place as requests are
/// created or edited so later lookups see the current state.
#[derive(Debug, Clone, Default)]
pub struct OpenPrIndex {
    by_head: HashMap<String, Vec<PullRequest>>,
}

impl OpenPrIndex {
    /// Index a list of open pull requests
    pub fn from_prs(prs: impl IntoIterator<Item = PullRequest>) -> Self {
        let mut index = Self::default();
        for pr in prs {
            index.insert(pr);
        }
        index
    }

    /// Number of open requests for `branch`
    pub fn count(&self, branch: &str) -> usize {
        self.by_head.get(branch).map_or(0, Vec::len)
    }

    /// The open request for `branch`, if there is exactly one
    pub fn get(&self, branch: &str) -> Option<&PullRequest> {
        match self.by_head.get(branch).map(Vec::as_slice) {
            Some([pr]) => Some(pr),
            _ => None,
        }
    }

    /// Record a newly seen request
    pub fn insert(&mut self, pr: PullRequest) {
        self.by_head.entry(pr.head_ref.clone()).or_default().push(pr);
    }

    /// Replace the request with the same number, keyed by `branch`
    ///
    /// `branch` is passed explicitly since platforms do not always echo
    /// the head ref on update responses.
    pub fn replace(&mut self, branch: &str, pr: PullRequest) {
        let entries = self.by_head.entry(branch.to_string()).or_default();
        match entries.iter_mut().find(|existing| existing.number == pr.number) {
            Some(existing) => *existing = pr,
            None => entries.push(pr),
        }
    }

    /// Record a base change without a platform round-trip
    pub fn set_base(&mut self, branch: &str, base: &str) {
        if let Some(entries) = self.by_head.get_mut(branch) {
            for pr in entries {
                pr.base_ref = base.to_string();
            }
        }
    }

    /// Fail if any segment's branch has more than one open request
    pub fn check_unambiguous(&self, segments: &[Segment]) -> Result<()> {
        let ambiguous: Vec<String> = segments
            .iter()
            .filter(|seg| self.count(&seg.branch) > 1)
            .map(|seg| {
                let urls: Vec<&str> = self.by_head[&seg.branch]
                    .iter()
                    .map(|pr| pr.html_url.as_str())
                    .collect();
                format!("{}: {}", seg.branch, urls.join(", "))
            })
            .collect();

        if ambiguous.is_empty() {
            Ok(())
        } else {
            Err(Error::AmbiguousRequests(ambiguous))
        }
    }
}
