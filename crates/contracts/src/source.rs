//! RecordSource trait - shard record source abstraction
//!
//! Defines a unified interface over the shared store and test doubles, so
//! the pipeline can be exercised without a live store.

use crate::{BridgeError, ShardRecord};

/// Per-shard record source
///
/// The pipeline drains a source exactly once per run.
#[trait_variant::make(RecordSource: Send)]
pub trait LocalRecordSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Fetch every shard record currently published
    ///
    /// # Errors
    /// Any read or decode failure aborts the whole run; there is no
    /// partial aggregation from malformed records.
    async fn fetch_all(&mut self) -> Result<Vec<ShardRecord>, BridgeError>;
}
