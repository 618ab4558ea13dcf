//! git-pr-chain - Stacked pull requests from a linear git branch
//!
//! A chain is the run of commits between a branch's tracked upstream and its
//! tip. Commits opt into a pull request branch with a `git-pr-chain: <branch>`
//! (or `GPC: <branch>`) trailer; the branch carries forward to later commits
//! until another trailer or a `STOP` marker.
//!
//! The library is split into:
//! - [`repo`] - the git backend (commit oracle and push transport)
//! - [`chain`] - extraction, branch resolution, validation and grouping
//! - [`platform`] - GitHub / GitLab pull request services
//! - [`sync`] - base-graph reconciliation, pushing and request synchronization

pub mod auth;
pub mod chain;
pub mod error;
pub mod platform;
pub mod repo;
pub mod sync;
pub mod types;
