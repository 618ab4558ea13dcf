//! Merging the bottom of a chain

use crate::chain::Segment;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::sync::index::OpenPrIndex;
use crate::types::{MergeMethod, MergeOutcome, PullRequest};
use tracing::info;

/// The open request of the first segment, the only one that merges into the
/// root branch
pub fn first_request<'a>(segments: &[Segment], index: &'a OpenPrIndex) -> Result<&'a PullRequest> {
    let first = segments.first().ok_or(Error::NoSegments)?;
    index.get(&first.branch).ok_or_else(|| {
        Error::Platform(format!("no open pull request for branch {}", first.branch))
    })
}

/// Merge the first segment's request with `method`
///
/// A refusal by the service is not an error; it is reported through
/// [`MergeOutcome::merged`].
pub async fn merge_first(
    segments: &[Segment],
    index: &OpenPrIndex,
    platform: &dyn PlatformService,
    method: MergeMethod,
) -> Result<(PullRequest, MergeOutcome)> {
    let pr = first_request(segments, index)?;
    info!("Merging #{} ({}) with method {method}", pr.number, pr.head_ref);
    let outcome = platform.merge_pr(pr.number, method).await?;
    Ok((pr.clone(), outcome))
}
