//! Pipeline orchestrator - coordinates collect, aggregate and dispatch.
//!
//! One pass per process run: drain the configured source, reduce the
//! records, fan the aggregate out to every destination, join on all of
//! them.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use collector::{ApplicationClient, ShardStatsStore};
use contracts::{AggregateStats, BroadcastPlan, RecordSource, SourceKind};
use dispatcher::Dispatcher;
use observability::{record_aggregate, record_dispatch_outcome, record_records_collected};
use tracing::{info, warn};

use super::BroadcastStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The broadcast plan
    pub plan: BroadcastPlan,

    /// Per-request timeout (None = host stack ambient default)
    pub request_timeout: Option<Duration>,

    /// Skip dispatch when the aggregate reports zero shards
    pub skip_empty: bool,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run one collect -> aggregate -> dispatch pass
    pub async fn run(self) -> Result<BroadcastStats> {
        let start_time = Instant::now();
        let plan = &self.config.plan;

        let stats = match plan.source.kind {
            SourceKind::Store => self.aggregate_from_store().await?,
            SourceKind::Application => self.aggregate_from_application().await?,
        };

        record_aggregate(stats);
        info!(
            shards = stats.shard_count,
            servers = stats.server_count,
            "Aggregate computed"
        );

        // Optional zero-shard guard; off by default, so a zero aggregate
        // is still broadcast
        if self.config.skip_empty && stats.is_empty() {
            warn!("Aggregate reports zero shards, skipping dispatch");
            return Ok(BroadcastStats {
                stats,
                outcomes: Vec::new(),
                skipped: true,
                duration: start_time.elapsed(),
            });
        }

        let dispatcher =
            Dispatcher::new(self.config.request_timeout).context("Failed to create dispatcher")?;

        info!(destinations = plan.destinations.len(), "Dispatching aggregate");
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;

        for outcome in &outcomes {
            record_dispatch_outcome(outcome);
        }

        Ok(BroadcastStats {
            stats,
            outcomes,
            skipped: false,
            duration: start_time.elapsed(),
        })
    }

    /// Collect records from the shared store and reduce them
    ///
    /// The store connection is dropped here, before any dispatch begins;
    /// the store is not needed once the aggregate is known.
    async fn aggregate_from_store(&self) -> Result<AggregateStats> {
        let store_config = &self.config.plan.store;

        info!(address = %store_config.address(), "Connecting to shard stats store");
        let mut store = ShardStatsStore::connect(store_config)
            .await
            .with_context(|| {
                format!("Failed to connect to store at {}", store_config.address())
            })?;

        info!(key = %store_config.key, "Retrieving shard records");
        let stats = Self::aggregate_from_source(&mut store).await?;

        info!("Closing store connection");
        drop(store);

        Ok(stats)
    }

    /// Drain any record source and reduce its records
    async fn aggregate_from_source<S: RecordSource>(source: &mut S) -> Result<AggregateStats> {
        let records = source
            .fetch_all()
            .await
            .with_context(|| format!("Failed to fetch records from {}", source.name()))?;

        record_records_collected(records.len());
        Ok(AggregateStats::from_records(&records))
    }

    /// Ask the application metadata endpoint for the live guild count
    async fn aggregate_from_application(&self) -> Result<AggregateStats> {
        let client = ApplicationClient::new(&self.config.plan.source)
            .context("Failed to create application metadata client")?;

        info!(api_base = %self.config.plan.source.api_base, "Fetching application metadata");
        let info = client
            .fetch_application()
            .await
            .context("Failed to fetch application metadata")?;

        Ok(info.to_stats()?)
    }
}
