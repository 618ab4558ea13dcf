//! Chain derivation
//!
//! Turns the commits between the tracked upstream and `HEAD` into ordered,
//! named segments, one per pull request.

mod builder;
mod commit;
mod segments;
mod validate;

pub use builder::{
    branch_prefix, build_chain, extract_chain, resolve_branches, Chain, BRANCH_PREFIX_CONFIG_KEY,
};
pub use commit::CommitRecord;
pub use segments::{adjacency_runs, desired_base, group_segments, Run, Segment};
pub use validate::validate_chain;
