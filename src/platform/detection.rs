//! Platform detection from remote URLs

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use regex::Regex;
use std::env;
use std::sync::OnceLock;

fn repo_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Everything after the host: `host:owner/repo` (scp-like) or `host/owner/repo`
    RE.get_or_init(|| {
        Regex::new(r"^(?:[a-z+]+://)?(?:[^@/]+@)?[^/:]+(?::\d+)?[/:](.+?)(?:\.git)?/?$")
            .expect("hardcoded regex is valid")
    })
}

/// Detect platform (GitHub or GitLab) from a remote URL
pub fn detect_platform(url: &str) -> Option<Platform> {
    let hostname = extract_hostname(url)?;
    platform_for_host(&hostname)
}

fn platform_for_host(hostname: &str) -> Option<Platform> {
    let matches = |public: &str, var: &str| {
        hostname == public
            || hostname.ends_with(&format!(".{public}"))
            || env::var(var).is_ok_and(|h| h == hostname)
    };

    if matches("github.com", "GH_HOST") {
        Some(Platform::GitHub)
    } else if matches("gitlab.com", "GITLAB_HOST") {
        Some(Platform::GitLab)
    } else {
        None
    }
}

/// Parse platform and owner/repo from a remote URL
///
/// Accepts `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo.git`. GitLab owners may contain nested groups.
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let hostname = extract_hostname(url)
        .ok_or_else(|| Error::Parse(format!("cannot find host in remote URL: {url}")))?;
    let platform = platform_for_host(&hostname).ok_or(Error::NoSupportedRemotes)?;

    let path = repo_path_re()
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    let (owner, repo) = path
        .rsplit_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
        .ok_or_else(|| Error::Parse(format!("invalid repo path: {path}")))?;

    let public = match platform {
        Platform::GitHub => "github.com",
        Platform::GitLab => "gitlab.com",
    };

    Ok(PlatformConfig {
        platform,
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: (hostname != public).then_some(hostname),
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    let url = url.trim();

    // scp-like syntax: [user@]host:path
    if !url.contains("://") {
        let (host_part, _) = url.split_once(':')?;
        let host = host_part.rsplit('@').next()?;
        return (!host.is_empty()).then(|| host.to_string());
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}
