//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
///
/// Tokens are never included; only their lengths are reported.
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    bot_id: String,
    source: SourceInfo,
    store: StoreInfo,
    destinations: Vec<DestinationInfo>,
}

#[derive(Serialize)]
struct SourceInfo {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_base: Option<String>,
}

#[derive(Serialize)]
struct StoreInfo {
    host: String,
    port: u16,
    db: i64,
    key: String,
}

#[derive(Serialize)]
struct DestinationInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_length: Option<usize>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let plan = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&plan, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&plan, args);
    }

    Ok(())
}

fn build_config_info(plan: &contracts::BroadcastPlan, args: &InfoArgs) -> ConfigInfo {
    let destinations = plan
        .destinations
        .iter()
        .map(|d| {
            if args.destinations {
                DestinationInfo {
                    name: d.name.clone(),
                    method: Some(d.method.to_uppercase()),
                    endpoint: Some(d.endpoint.clone()),
                    delivery: Some(delivery_mode(d).to_string()),
                    token_length: Some(d.token.len()),
                }
            } else {
                DestinationInfo {
                    name: d.name.clone(),
                    method: None,
                    endpoint: None,
                    delivery: None,
                    token_length: None,
                }
            }
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", plan.version),
        bot_id: plan.bot_id.clone(),
        source: SourceInfo {
            kind: format!("{:?}", plan.source.kind),
            api_base: match plan.source.kind {
                contracts::SourceKind::Application => Some(plan.source.api_base.clone()),
                contracts::SourceKind::Store => None,
            },
        },
        store: StoreInfo {
            host: plan.store.host.clone(),
            port: plan.store.port,
            db: plan.store.db,
            key: plan.store.key.clone(),
        },
        destinations,
    }
}

fn delivery_mode(destination: &contracts::DestinationConfig) -> &'static str {
    if destination.uses_query_mode() {
        "query"
    } else {
        "body"
    }
}

fn print_config_info(plan: &contracts::BroadcastPlan, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Shardcast Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🤖 Bot");
    println!("   ├─ Version: {:?}", plan.version);
    println!("   ├─ Bot ID: {}", plan.bot_id);
    match plan.source.kind {
        contracts::SourceKind::Store => {
            println!("   └─ Source: shared store");
        }
        contracts::SourceKind::Application => {
            println!("   └─ Source: application metadata ({})", plan.source.api_base);
        }
    }

    println!("\n🗄  Store");
    println!("   ├─ Address: {}", plan.store.address());
    println!("   ├─ Database: {}", plan.store.db);
    println!("   └─ Hash key: {}", plan.store.key);

    println!("\n📤 Destinations ({})", plan.destinations.len());
    for (i, destination) in plan.destinations.iter().enumerate() {
        let is_last = i == plan.destinations.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };

        if args.destinations {
            println!(
                "   {} {} [{}] {} ({} mode, token: {} chars)",
                prefix,
                destination.name,
                destination.method.to_uppercase(),
                destination.endpoint,
                delivery_mode(destination),
                destination.token.len()
            );
        } else {
            println!("   {} {}", prefix, destination.name);
        }
    }

    println!();
}
