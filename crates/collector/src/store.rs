//! ShardStatsStore - Redis-backed record store
//!
//! Reads the hash of per-shard records that worker shards keep updated.

use std::collections::HashMap;

use contracts::{BridgeError, RecordSource, ShardRecord, StoreConfig};
use redis::AsyncCommands;
use tracing::debug;

/// Redis-backed shard record store
pub struct ShardStatsStore {
    connection: redis::aio::MultiplexedConnection,
    key: String,
}

impl ShardStatsStore {
    /// Connect to the store and verify the connection with a PING
    ///
    /// # Errors
    /// Connection or health-check failures are fatal to the run.
    pub async fn connect(config: &StoreConfig) -> Result<Self, BridgeError> {
        let client = redis::Client::open(config.connection_url())
            .map_err(|e| BridgeError::store_connection(format!("invalid store URL: {e}")))?;

        let mut connection =
            client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| {
                    BridgeError::store_connection(format!(
                        "failed to connect to store at {}: {e}",
                        config.address()
                    ))
                })?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|e| BridgeError::store_connection(format!("store PING failed: {e}")))?;
        if pong != "PONG" {
            return Err(BridgeError::store_connection(format!(
                "unexpected PING response: {pong}"
            )));
        }

        debug!(address = %config.address(), key = %config.key, "Connected to shard stats store");

        Ok(Self {
            connection,
            key: config.key.clone(),
        })
    }
}

impl RecordSource for ShardStatsStore {
    fn name(&self) -> &str {
        "store"
    }

    async fn fetch_all(&mut self) -> Result<Vec<ShardRecord>, BridgeError> {
        let entries: HashMap<String, String> =
            self.connection.hgetall(&self.key).await.map_err(|e| {
                BridgeError::store_read(format!("HGETALL {} failed: {e}", self.key))
            })?;

        debug!(key = %self.key, entries = entries.len(), "Fetched shard stats hash");
        decode_records(entries)
    }
}

/// Decode raw hash entries into shard records
///
/// A decode failure for any single entry is fatal; there is no partial
/// aggregation from malformed records. Records are returned in shard-id
/// order for stable log output.
pub fn decode_records(entries: HashMap<String, String>) -> Result<Vec<ShardRecord>, BridgeError> {
    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let record: ShardRecord = serde_json::from_str(&value)
            .map_err(|e| BridgeError::record_decode(key, e.to_string()))?;
        records.push(record);
    }
    records.sort_by_key(|r| r.id);
    Ok(records)
}
