//! Synchronization of a chain with its hosting service
//!
//! Pure planning lives in [`plan`], [`reconcile`] and [`description`];
//! [`execute`] and [`push`] perform the side effects.

pub mod description;
pub mod execute;
pub mod index;
pub mod merge;
pub mod plan;
pub mod progress;
pub mod push;
pub mod reconcile;

pub use description::{render_region, splice_region, ChainEntry, REGION_END, REGION_START};
pub use execute::{sync_chain, SyncResult};
pub use index::OpenPrIndex;
pub use merge::{first_request, merge_first};
pub use plan::{chain_entries, plan_creations, plan_update, PrChange, PrToCreate};
pub use progress::{NoopProgress, Phase, ProgressCallback, PushStatus};
pub use push::{push_segments, MAX_CONCURRENT_PUSHES};
pub use reconcile::{branches_to_reset, plan_base_resets, BaseReset};
