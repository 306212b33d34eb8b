//! ShardRecord - per-shard metrics published by worker shards

use serde::{Deserialize, Serialize};

/// Metrics snapshot one worker shard publishes to the shared store
///
/// The pipeline only reads these. One record per shard id; ids need not be
/// contiguous or ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardRecord {
    /// Shard id
    pub id: u32,

    /// Free-form shard status (e.g. "ready")
    pub status: String,

    /// Guilds currently held in this shard's cache
    pub guilds_cache_size: u64,

    /// Users currently held in this shard's cache
    pub users_cache_size: u64,

    /// Timestamp of the shard's last heartbeat (milliseconds since epoch)
    pub updated_at: u64,
}
