//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse YAML/TOML/JSON configuration files
//! - Validate configuration legality
//! - Normalize the plan (resolve `@bot_id@` in endpoint templates)
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let plan = ConfigLoader::load_from_path(Path::new("config.yaml")).unwrap();
//! println!("Destinations: {}", plan.destinations.len());
//! ```

mod parser;
mod validator;

pub use contracts::BroadcastPlan;
pub use parser::ConfigFormat;

use contracts::BridgeError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension
    /// (.yaml / .yml / .toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<BroadcastPlan, BridgeError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<BroadcastPlan, BridgeError> {
        Self::parse_validate_normalize(content, format)
    }

    /// Serialize a BroadcastPlan to a YAML string
    pub fn to_yaml(plan: &BroadcastPlan) -> Result<String, BridgeError> {
        serde_yaml::to_string(plan)
            .map_err(|e| BridgeError::config_parse(format!("YAML serialize error: {e}")))
    }

    /// Serialize a BroadcastPlan to a JSON string
    pub fn to_json(plan: &BroadcastPlan) -> Result<String, BridgeError> {
        serde_json::to_string_pretty(plan)
            .map_err(|e| BridgeError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, BridgeError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            BridgeError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| BridgeError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, BridgeError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse, validate, then normalize configuration content
    ///
    /// Normalization resolves `@bot_id@` in every endpoint template; it
    /// runs exactly once, here.
    fn parse_validate_normalize(
        content: &str,
        format: ConfigFormat,
    ) -> Result<BroadcastPlan, BridgeError> {
        let mut plan = parser::parse(content, format)?;
        validator::validate(&plan)?;
        plan.resolve_endpoints();
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = r#"
bot_id: "123456789"

store:
  host: localhost
  port: 6379

destinations:
  - name: listing-a
    endpoint: "https://a.example.com/bots/@bot_id@/stats"
    token: token-a
  - name: listing-b
    endpoint: "https://b.example.com/count?guilds=@server_count@"
    token: token-b
    method: GET
"#;

    #[test]
    fn load_from_str_yaml() {
        let result = ConfigLoader::load_from_str(MINIMAL_YAML, ConfigFormat::Yaml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let plan = result.unwrap();
        assert_eq!(plan.destinations.len(), 2);
        // Normalization resolved the bot id in endpoints
        assert_eq!(
            plan.destinations[0].endpoint,
            "https://a.example.com/bots/123456789/stats"
        );
    }

    #[test]
    fn validation_runs_after_parse() {
        let content = r#"
bot_id: "123456789"
destinations: []
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Yaml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at least one destination"));
    }

    #[test]
    fn round_trip_yaml() {
        let plan = ConfigLoader::load_from_str(MINIMAL_YAML, ConfigFormat::Yaml).unwrap();
        let serialized = ConfigLoader::to_yaml(&plan).unwrap();
        let plan2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Yaml).unwrap();
        assert_eq!(plan.bot_id, plan2.bot_id);
        assert_eq!(plan.destinations.len(), plan2.destinations.len());
        assert_eq!(plan.destinations[1].method, plan2.destinations[1].method);
    }

    #[test]
    fn round_trip_json() {
        let plan = ConfigLoader::load_from_str(MINIMAL_YAML, ConfigFormat::Yaml).unwrap();
        let json = ConfigLoader::to_json(&plan).unwrap();
        let plan2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(plan.bot_id, plan2.bot_id);
    }
}
