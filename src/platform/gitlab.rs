//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, MergeOutcome, Platform, PlatformConfig, PrUpdate, PullRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base: String,
    config: PlatformConfig,
    project_path: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    iid: u64,
    web_url: String,
    source_branch: String,
    target_branch: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: String,
}

impl From<MergeRequest> for PullRequest {
    fn from(mr: MergeRequest) -> Self {
        Self {
            number: mr.iid,
            html_url: mr.web_url,
            base_ref: mr.target_branch,
            head_ref: mr.source_branch,
            title: mr.title,
            body: mr.description.unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct UpdateMrPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    target_branch: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct MergeMrPayload {
    squash: bool,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for listing merge requests
const PAGE_SIZE: usize = 100;

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(token: String, owner: String, repo: String, host: Option<String>) -> Self {
        let host = host.unwrap_or_else(|| "gitlab.com".to_string());
        let api_base = format!("https://{host}/api/v4");
        let mut service = Self::with_api_base(token, owner, repo, api_base);
        service.config.host = (host != "gitlab.com").then_some(host);
        service
    }

    /// Create a service talking to an explicit API root (e.g. `http://127.0.0.1:1234/api/v4`)
    pub fn with_api_base(token: String, owner: String, repo: String, api_base: String) -> Self {
        let project_path = format!("{owner}/{repo}");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            config: PlatformConfig {
                platform: Platform::GitLab,
                owner,
                repo,
                host: None,
            },
            project_path,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn mr_url(&self, suffix: &str) -> String {
        self.api_url(&format!(
            "/projects/{}/merge_requests{suffix}",
            urlencoding::encode(&self.project_path)
        ))
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        let url = self.mr_url("");
        let per_page = PAGE_SIZE.to_string();
        let mut prs = Vec::new();

        for page in 1.. {
            let page_str = page.to_string();
            let batch: Vec<MergeRequest> = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(&[
                    ("state", "opened"),
                    ("per_page", per_page.as_str()),
                    ("page", page_str.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::GitLabApi(e.to_string()))?
                .json()
                .await?;

            let done = batch.len() < PAGE_SIZE;
            prs.extend(batch.into_iter().map(PullRequest::from));
            if done {
                break;
            }
        }

        debug!("GitLab reports {} open merge requests", prs.len());
        Ok(prs)
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let payload = CreateMrPayload {
            source_branch: head,
            target_branch: base,
            title,
            description: body,
        };

        let mr: MergeRequest = self
            .client
            .post(self.mr_url(""))
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        Ok(mr.into())
    }

    async fn update_pr(&self, pr_number: u64, update: &PrUpdate) -> Result<PullRequest> {
        let payload = UpdateMrPayload {
            target_branch: update.base.as_deref(),
            description: update.body.as_deref(),
        };

        let mr: MergeRequest = self
            .client
            .put(self.mr_url(&format!("/{pr_number}")))
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        Ok(mr.into())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeOutcome> {
        let squash = match method {
            MergeMethod::Merge => false,
            MergeMethod::Squash => true,
            MergeMethod::Rebase => {
                return Err(Error::GitLabApi(
                    "rebase merges are not supported through the GitLab API".to_string(),
                ));
            }
        };

        let response = self
            .client
            .put(self.mr_url(&format!("/{pr_number}/merge")))
            .header("PRIVATE-TOKEN", &self.token)
            .json(&MergeMrPayload { squash })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let mr: MergeRequest = response.json().await?;
            return Ok(MergeOutcome {
                merged: mr.state == "merged",
                message: None,
            });
        }

        // GitLab refused to merge: not mergeable, SHA mismatch, conflicts
        if matches!(status.as_u16(), 405 | 406 | 409 | 422) {
            let message = response.text().await.unwrap_or_default();
            return Ok(MergeOutcome {
                merged: false,
                message: Some(format!("{status}: {message}")),
            });
        }

        Err(Error::GitLabApi(format!("merge of !{pr_number} failed: {status}")))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
