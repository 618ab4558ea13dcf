//! Platform service factory
//!
//! Creates platform services based on configuration.

use crate::auth::get_token;
use crate::error::Result;
use crate::platform::{GitHubService, GitLabService, PlatformService};
use crate::types::{Platform, PlatformConfig};

/// Create a platform service from configuration
///
/// Handles authentication and client construction for both GitHub and GitLab.
pub async fn create_platform_service(
    config: &PlatformConfig,
) -> Result<Box<dyn PlatformService>> {
    let auth = get_token(config.platform, config.host.as_deref()).await?;

    match config.platform {
        Platform::GitHub => Ok(Box::new(GitHubService::new(
            &auth.token,
            config.owner.clone(),
            config.repo.clone(),
            config.host.clone(),
        )?)),
        Platform::GitLab => Ok(Box::new(GitLabService::new(
            auth.token,
            config.owner.clone(),
            config.repo.clone(),
            config.host.clone(),
        ))),
    }
}
