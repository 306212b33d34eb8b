//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::template;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PlanSummary>,
}

#[derive(Serialize)]
struct PlanSummary {
    bot_id: String,
    source: String,
    store: String,
    destination_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(plan) => {
            let warnings = collect_warnings(&plan);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(PlanSummary {
                    bot_id: plan.bot_id.clone(),
                    source: format!("{:?}", plan.source.kind),
                    store: plan.store.address(),
                    destination_count: plan.destinations.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(plan: &contracts::BroadcastPlan) -> Vec<String> {
    let mut warnings = Vec::new();

    for destination in &plan.destinations {
        // Body-mode destinations without a template fall back to the default
        if !destination.uses_query_mode()
            && destination.body_template.as_deref().unwrap_or("").is_empty()
        {
            warnings.push(format!(
                "Destination '{}' has no body_template - default pattern will be sent",
                destination.name
            ));
        }

        // The application source cannot report a shard count
        if plan.source.kind == contracts::SourceKind::Application {
            let uses_shard_count = destination.endpoint.contains(template::SHARD_COUNT)
                || destination
                    .effective_body_template()
                    .contains(template::SHARD_COUNT);
            if uses_shard_count {
                warnings.push(format!(
                    "Destination '{}' uses @shard_count@, which renders as 0 with the application source",
                    destination.name
                ));
            }
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Bot: {}", summary.bot_id);
            println!("  Source: {}", summary.source);
            println!("  Store: {}", summary.store);
            println!("  Destinations: {}", summary.destination_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
