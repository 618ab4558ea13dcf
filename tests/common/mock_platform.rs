//! Mock platform service for testing

use crate::common::Journal;
use async_trait::async_trait;
use git_pr_chain::error::{Error, Result};
use git_pr_chain::platform::PlatformService;
use git_pr_chain::types::{MergeMethod, MergeOutcome, PlatformConfig, PrUpdate, PullRequest};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Call record for `update_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePrCall {
    pub pr_number: u64,
    pub update: PrUpdate,
}

/// Stateful mock platform service
///
/// This manually implements `PlatformService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Keeps a list of open PRs that creations and updates modify, so a
///   second synchronization sees the results of the first
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    journal: Journal,
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PullRequest>>,
    merge_refusal: Mutex<Option<String>>,
    // Call tracking
    list_calls: AtomicU64,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    update_pr_calls: Mutex<Vec<UpdatePrCall>>,
    merge_pr_calls: Mutex<Vec<(u64, MergeMethod)>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_update_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            journal: Journal::default(),
            next_pr_number: AtomicU64::new(100),
            open_prs: Mutex::new(Vec::new()),
            merge_refusal: Mutex::new(None),
            list_calls: AtomicU64::new(0),
            create_pr_calls: Mutex::new(Vec::new()),
            update_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_update_pr: Mutex::new(None),
        }
    }

    /// Share a journal with other fakes
    #[must_use]
    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    /// Seed an already open PR
    pub fn add_open_pr(&self, pr: PullRequest) {
        self.open_prs.lock().unwrap().push(pr);
    }

    /// Current state of the open PR for `head`
    pub fn open_pr(&self, head: &str) -> Option<PullRequest> {
        self.open_prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.head_ref == head)
            .cloned()
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_pr` return an error
    pub fn fail_update_pr(&self, msg: &str) {
        *self.error_on_update_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` report an unmerged outcome with `msg`
    pub fn refuse_merge(&self, msg: &str) {
        *self.merge_refusal.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Number of `list_open_prs` calls
    pub fn list_call_count(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `update_pr` calls
    pub fn get_update_pr_calls(&self) -> Vec<UpdatePrCall> {
        self.update_pr_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<(u64, MergeMethod)> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Whether any mutating call was made
    pub fn has_writes(&self) -> bool {
        !self.get_create_pr_calls().is_empty()
            || !self.get_update_pr_calls().is_empty()
            || !self.get_merge_pr_calls().is_empty()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `update_pr` set the base of `pr_number` to `base`
    pub fn assert_base_updated(&self, pr_number: u64, base: &str) {
        let calls = self.get_update_pr_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.pr_number == pr_number && c.update.base.as_deref() == Some(base)),
            "Expected update_pr({pr_number}, base={base}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.journal.record(format!("create {head}"));
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        };
        self.open_prs.lock().unwrap().push(pr.clone());
        Ok(pr)
    }

    async fn update_pr(&self, pr_number: u64, update: &PrUpdate) -> Result<PullRequest> {
        self.journal.record(format!("update #{pr_number}"));
        self.update_pr_calls.lock().unwrap().push(UpdatePrCall {
            pr_number,
            update: update.clone(),
        });

        if let Some(msg) = self.error_on_update_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let mut prs = self.open_prs.lock().unwrap();
        let pr = prs
            .iter_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::Platform(format!("no PR #{pr_number}")))?;
        if let Some(base) = &update.base {
            pr.base_ref.clone_from(base);
        }
        if let Some(body) = &update.body {
            pr.body.clone_from(body);
        }
        Ok(pr.clone())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeOutcome> {
        self.journal.record(format!("merge #{pr_number}"));
        self.merge_pr_calls.lock().unwrap().push((pr_number, method));

        if let Some(msg) = self.merge_refusal.lock().unwrap().as_ref() {
            return Ok(MergeOutcome {
                merged: false,
                message: Some(msg.clone()),
            });
        }

        self.open_prs
            .lock()
            .unwrap()
            .retain(|pr| pr.number != pr_number);
        Ok(MergeOutcome {
            merged: true,
            message: Some("Pull Request successfully merged".to_string()),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
