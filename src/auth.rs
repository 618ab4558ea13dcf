//! Token discovery for GitHub and GitLab
//!
//! Tokens come from the platform's CLI tool (`gh`, `glab`) when it is
//! installed and logged in, otherwise from environment variables.

use crate::error::{Error, Result};
use crate::types::Platform;
use std::env;
use tokio::process::Command;
use tracing::debug;

/// Where a token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Printed by a CLI tool
    Cli(&'static str),
    /// Read from an environment variable
    EnvVar(&'static str),
}

/// A resolved API token
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Token value
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

const GITHUB_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];
const GITLAB_ENV_VARS: &[&str] = &["GITLAB_TOKEN", "GL_TOKEN"];

/// Find a token for `platform`
///
/// Priority:
/// 1. CLI tool (`gh auth token` / `glab config get token`)
/// 2. `GITHUB_TOKEN`, `GH_TOKEN` (GitHub) or `GITLAB_TOKEN`, `GL_TOKEN` (GitLab)
pub async fn get_token(platform: Platform, host: Option<&str>) -> Result<AuthToken> {
    let (tool, vars, hint) = match platform {
        Platform::GitHub => ("gh", GITHUB_ENV_VARS, "Run `gh auth login` or set GITHUB_TOKEN"),
        Platform::GitLab => (
            "glab",
            GITLAB_ENV_VARS,
            "Run `glab auth login` or set GITLAB_TOKEN",
        ),
    };

    if let Some(token) = cli_token(tool, host).await {
        debug!("Using token from {tool}");
        return Ok(AuthToken {
            token,
            source: AuthSource::Cli(tool),
        });
    }

    token_from_env(vars).ok_or_else(|| {
        Error::Auth(format!("no {platform:?} authentication found. {hint}"))
    })
}

/// First non-empty variable among `vars`
pub fn token_from_env(vars: &'static [&'static str]) -> Option<AuthToken> {
    vars.iter().find_map(|var| {
        env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|token| AuthToken {
                token,
                source: AuthSource::EnvVar(var),
            })
    })
}

async fn cli_token(tool: &str, host: Option<&str>) -> Option<String> {
    let (mut args, host_flag) = match tool {
        "glab" => (vec!["config", "get", "token"], "--host"),
        _ => (vec!["auth", "token"], "--hostname"),
    };
    if let Some(h) = host {
        args.extend([host_flag, h]);
    }

    let output = Command::new(tool).args(&args).output().await.ok()?;
    if !output.status.success() {
        debug!("{tool} did not provide a token");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
