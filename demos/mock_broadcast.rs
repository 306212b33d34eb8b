//! Mock Broadcast Demo
//!
//! Demonstrates one collect -> aggregate -> dispatch pass using the
//! MockRecordSource and a local stand-in destination. This demo runs
//! without a Redis server or any external listing service.
//!
//! Run with: cargo run --bin mock_broadcast
//! Optionally pass a config file path to broadcast to real destinations.

use std::net::SocketAddr;

use collector::MockRecordSource;
use config_loader::ConfigLoader;
use contracts::{
    AggregateStats, BroadcastPlan, DestinationConfig, PlanVersion, RecordSource, ShardRecord,
    SourceConfig, StoreConfig,
};
use dispatcher::Dispatcher;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Broadcast Demo");

    // ==== Stage 1: Stand-in destination ====
    let addr = spawn_stand_in_destination().await?;
    tracing::info!(address = %addr, "Stand-in destination listening");

    // ==== Stage 2: Use default plan or load from file ====
    let plan = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading broadcast plan");
        ConfigLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        // Create a minimal test plan pointing at the stand-in
        create_test_plan(addr)
    };

    // ==== Stage 3: Collect and aggregate (mock) ====
    let mut source = MockRecordSource::with_records(vec![
        shard_record(0, 1204),
        shard_record(1, 1187),
        shard_record(2, 1260),
    ]);

    let records = source.fetch_all().await?;
    let stats = AggregateStats::from_records(&records);
    observability::record_aggregate(stats);
    tracing::info!(
        shards = stats.shard_count,
        servers = stats.server_count,
        "Aggregate computed"
    );

    // ==== Stage 4: Dispatch to every destination ====
    tracing::info!(destinations = plan.destinations.len(), "Dispatching aggregate");
    let dispatcher = Dispatcher::new(None)?;
    let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;

    for outcome in &outcomes {
        tracing::info!(
            destination = %outcome.destination,
            url = %outcome.url,
            status = %outcome.status,
            "Destination outcome"
        );
    }

    let delivered = outcomes.iter().filter(|o| o.is_success()).count();
    tracing::info!(
        delivered,
        total = outcomes.len(),
        "Mock broadcast demo completed"
    );

    Ok(())
}

fn shard_record(id: u32, guilds: u64) -> ShardRecord {
    ShardRecord {
        id,
        status: "ready".to_string(),
        guilds_cache_size: guilds,
        users_cache_size: guilds * 40,
        updated_at: 1_700_000_000_000,
    }
}

/// Minimal plan with one body-mode and one query-mode destination, both
/// pointing at the stand-in listener
fn create_test_plan(addr: SocketAddr) -> BroadcastPlan {
    let mut plan = BroadcastPlan {
        version: PlanVersion::V1,
        bot_id: "123456789".to_string(),
        source: SourceConfig::default(),
        store: StoreConfig::default(),
        destinations: vec![
            DestinationConfig {
                name: "body-listing".to_string(),
                endpoint: format!("http://{addr}/bots/@bot_id@/stats"),
                token: "demo-token".to_string(),
                body_template: None,
                method: "POST".to_string(),
            },
            DestinationConfig {
                name: "query-listing".to_string(),
                endpoint: format!("http://{addr}/count?guilds=@server_count@"),
                token: "demo-token".to_string(),
                body_template: None,
                method: "GET".to_string(),
            },
        ],
    };
    plan.resolve_endpoints();
    plan
}

/// Accept every request, log its first line, answer 200 OK
async fn spawn_stand_in_destination() -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                if let Some(request_line) = head.lines().next() {
                    tracing::info!(request = %request_line, "Stand-in received");
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
            });
        }
    });

    Ok(addr)
}
