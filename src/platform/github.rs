//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, MergeOutcome, Platform, PlatformConfig, PrUpdate, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::params::State;
use octocrab::params::pulls::MergeMethod as GhMergeMethod;
use tracing::debug;

/// Page size for listing pull requests
const PAGE_SIZE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                platform: Platform::GitHub,
                owner,
                repo,
                host,
            },
        })
    }
}

fn convert(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone().unwrap_or_default(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        // Filtering by head does not work for branches in the same repo
        // without the owner prefix, so fetch everything open and group locally.
        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(State::Open)
            .per_page(PAGE_SIZE)
            .send()
            .await?;

        let prs = self.client.all_pages(first_page).await?;
        debug!("GitHub reports {} open pull requests", prs.len());

        Ok(prs.iter().map(convert).collect())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .body(body)
            .send()
            .await?;

        Ok(convert(&pr))
    }

    async fn update_pr(&self, pr_number: u64, update: &PrUpdate) -> Result<PullRequest> {
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut request = pulls.update(pr_number);
        if let Some(base) = &update.base {
            request = request.base(base.as_str());
        }
        if let Some(body) = &update.body {
            request = request.body(body.as_str());
        }

        let pr = request.send().await?;
        Ok(convert(&pr))
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeOutcome> {
        let method = match method {
            MergeMethod::Merge => GhMergeMethod::Merge,
            MergeMethod::Squash => GhMergeMethod::Squash,
            MergeMethod::Rebase => GhMergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(method)
            .send()
            .await;

        match result {
            Ok(merge) => Ok(MergeOutcome {
                merged: merge.merged,
                message: merge.message,
            }),
            // 405: not mergeable, 409: head moved since the last push
            Err(octocrab::Error::GitHub { source, .. })
                if matches!(source.status_code.as_u16(), 405 | 409) =>
            {
                Ok(MergeOutcome {
                    merged: false,
                    message: Some(source.message),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
