//! Broadcast metric recording
//!
//! Named metric helpers for a run. Values go to whatever recorder is
//! installed; without one the macros are no-ops.

use contracts::{AggregateStats, DispatchOutcome, DispatchStatus};
use metrics::{counter, gauge};

/// Record how many shard records the source returned this run
pub fn record_records_collected(count: usize) {
    gauge!("shardcast_shards_collected").set(count as f64);
}

/// Record the computed aggregate
pub fn record_aggregate(stats: AggregateStats) {
    gauge!("shardcast_server_count").set(stats.server_count as f64);
    gauge!("shardcast_shard_count").set(stats.shard_count as f64);
}

/// Record one destination's outcome
///
/// Status label: `delivered` (2xx), `rejected` (non-2xx response),
/// `failed` (construction or transport failure).
pub fn record_dispatch_outcome(outcome: &DispatchOutcome) {
    let status = match &outcome.status {
        DispatchStatus::Responded { code, .. } => {
            gauge!(
                "shardcast_destination_http_code",
                "destination" => outcome.destination.clone()
            )
            .set(*code as f64);

            if outcome.is_success() {
                "delivered"
            } else {
                "rejected"
            }
        }
        DispatchStatus::Failed { .. } => "failed",
    };

    counter!(
        "shardcast_dispatches_total",
        "destination" => outcome.destination.clone(),
        "status" => status.to_string()
    )
    .increment(1);
}
