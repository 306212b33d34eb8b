//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_broadcast(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load, validate and normalize configuration
    let mut plan = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref host) = args.store_host {
        info!(host = %host, "Overriding store host from CLI");
        plan.store.host = host.clone();
    }
    if let Some(port) = args.store_port {
        info!(port = %port, "Overriding store port from CLI");
        plan.store.port = port;
    }

    info!(
        bot_id = %plan.bot_id,
        source = ?plan.source.kind,
        store = %plan.store.address(),
        destinations = plan.destinations.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_plan_summary(&plan);
        return Ok(());
    }

    let pipeline_config = PipelineConfig {
        plan,
        request_timeout: if args.request_timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(args.request_timeout))
        },
        skip_empty: args.skip_empty,
    };

    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting broadcast...");

    tokio::select! {
        result = pipeline.run() => {
            let stats = result.context("Broadcast run failed")?;
            stats.print_summary();

            // Partial failure is a distinct, non-zero exit
            if !stats.all_succeeded() {
                anyhow::bail!(
                    "{} of {} destinations did not accept the aggregate",
                    stats.unsuccessful_count(),
                    stats.outcomes.len()
                );
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, aborting run");
        }
    }

    info!("Shardcast finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_plan_summary(plan: &contracts::BroadcastPlan) {
    println!("\n=== Configuration Summary ===\n");
    println!("Bot: {}", plan.bot_id);
    println!("Source: {:?}", plan.source.kind);
    println!("Store: {} (hash '{}')", plan.store.address(), plan.store.key);

    println!("\nDestinations ({}):", plan.destinations.len());
    for destination in &plan.destinations {
        let mode = if destination.uses_query_mode() {
            "query"
        } else {
            "body"
        };
        println!(
            "  - {} [{}] {} ({} mode)",
            destination.name,
            destination.method.to_uppercase(),
            destination.endpoint,
            mode
        );
    }

    println!();
}
