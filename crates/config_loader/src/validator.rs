//! Configuration validation
//!
//! Rules:
//! - bot_id non-empty
//! - at least one destination
//! - destination name / endpoint / token non-empty
//! - destination method a plausible HTTP token
//! - application source requires a bot token
//!
//! Every rule is fatal; validation runs before any network activity.

use contracts::{BridgeError, BroadcastPlan, SourceKind};

/// Validate a BroadcastPlan
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(plan: &BroadcastPlan) -> Result<(), BridgeError> {
    validate_bot_id(plan)?;
    validate_source(plan)?;
    validate_destinations(plan)?;
    Ok(())
}

fn validate_bot_id(plan: &BroadcastPlan) -> Result<(), BridgeError> {
    if plan.bot_id.is_empty() {
        return Err(BridgeError::config_validation(
            "bot_id",
            "bot_id must be defined",
        ));
    }
    Ok(())
}

fn validate_source(plan: &BroadcastPlan) -> Result<(), BridgeError> {
    if plan.source.kind == SourceKind::Application {
        match plan.source.bot_token.as_deref() {
            Some(token) if !token.is_empty() => {}
            _ => {
                return Err(BridgeError::config_validation(
                    "source.bot_token",
                    "application source requires a bot token",
                ));
            }
        }
        if plan.source.api_base.is_empty() {
            return Err(BridgeError::config_validation(
                "source.api_base",
                "api_base cannot be empty",
            ));
        }
    }
    Ok(())
}

fn validate_destinations(plan: &BroadcastPlan) -> Result<(), BridgeError> {
    if plan.destinations.is_empty() {
        return Err(BridgeError::config_validation(
            "destinations",
            "at least one destination must be configured",
        ));
    }

    for (idx, destination) in plan.destinations.iter().enumerate() {
        if destination.name.is_empty() {
            return Err(BridgeError::config_validation(
                format!("destinations[{idx}].name"),
                "destination name cannot be empty",
            ));
        }
        if destination.endpoint.is_empty() {
            return Err(BridgeError::config_validation(
                format!("destinations[{idx}].endpoint"),
                format!("endpoint for destination '{}' cannot be empty", destination.name),
            ));
        }
        if destination.token.is_empty() {
            return Err(BridgeError::config_validation(
                format!("destinations[{idx}].token"),
                format!("token for destination '{}' cannot be empty", destination.name),
            ));
        }
        if destination.method.is_empty()
            || !destination.method.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(BridgeError::config_validation(
                format!("destinations[{idx}].method"),
                format!("invalid HTTP method '{}'", destination.method),
            ));
        }
    }
    Ok(())
}
