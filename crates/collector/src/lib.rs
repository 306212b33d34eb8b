//! # Collector
//!
//! Record Store Adapter: reads raw per-shard records from the shared
//! store, or a single authoritative guild count from the application
//! metadata endpoint (alternative deployment variant).
//!
//! The store connection is dropped as soon as the read completes; the
//! store is not needed once the aggregate is known.

mod application;
mod mock;
mod store;

pub use application::{ApplicationClient, ApplicationInfo};
pub use mock::MockRecordSource;
pub use store::{decode_records, ShardStatsStore};
