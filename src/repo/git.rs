//! `git` subprocess backend

use crate::error::{Error, Result};
use crate::repo::GitBackend;
use crate::types::UpstreamRef;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// A git working tree driven through the `git` binary
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`
    pub async fn open(path: &Path) -> Result<Self> {
        let repo = Self {
            path: path.to_path_buf(),
        };
        repo.git(&["rev-parse", "--git-dir"]).await?;
        Ok(repo)
    }

    /// Path the repository was opened at
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn output(&self, args: &[&str]) -> Result<Output> {
        let start = Instant::now();
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .await
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;
        debug!(
            "git {} exited with {} in {}ms",
            args.join(" "),
            output.status,
            start.elapsed().as_millis()
        );
        Ok(output)
    }

    /// Run git, failing on a non-zero exit, and return trimmed stdout
    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(Error::Git(format!(
                "`git {}` failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl GitBackend for GitRepo {
    async fn tracked_upstream(&self, branch: &str) -> Result<UpstreamRef> {
        let branch_ref = self
            .git(&["rev-parse", "--symbolic-full-name", branch])
            .await?;
        let upstream = self
            .git(&["for-each-ref", "--format=%(upstream:short)", &branch_ref])
            .await?;

        UpstreamRef::parse(&upstream).ok_or_else(|| Error::NoUpstream(branch_ref))
    }

    async fn list_commits(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let range = format!("{from}..{to}");
        let out = self
            .git(&["log", "--reverse", "--pretty=%H", &range])
            .await?;

        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn commit_message(&self, id: &str) -> Result<String> {
        self.git(&["show", "--no-patch", "--format=%B", id]).await
    }

    async fn parent_count(&self, id: &str) -> Result<usize> {
        let parents = self.git(&["show", "--no-patch", "--format=%P", id]).await?;
        Ok(parents.split_whitespace().count())
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>> {
        let output = self.output(&["config", "--get", key]).await?;
        // `git config --get` exits with 1 when the key is unset
        match output.status.code() {
            Some(0) => Ok(Some(
                String::from_utf8_lossy(&output.stdout).trim().to_string(),
            )),
            Some(1) => Ok(None),
            _ => Err(Error::Git(format!(
                "`git config --get {key}` failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    async fn remote_url(&self, remote: &str) -> Result<String> {
        self.git(&["remote", "get-url", remote]).await
    }

    async fn force_push(&self, remote: &str, commit: &str, branch: &str) -> Result<String> {
        let refspec = format!("{commit}:refs/heads/{branch}");
        let output = self.output(&["push", "-f", remote, &refspec]).await?;

        let mut text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr.trim());
        }

        if output.status.success() {
            Ok(text)
        } else {
            Err(Error::Git(format!("push of {branch} to {remote} failed: {text}")))
        }
    }

    async fn pull_rebase(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["pull", "--rebase", remote, branch]).await?;
        Ok(())
    }
}
