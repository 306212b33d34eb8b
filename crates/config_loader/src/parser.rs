//! Configuration parsing
//!
//! YAML is the deployed format; TOML and JSON are supported as well.

use contracts::{BridgeError, BroadcastPlan};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (deployed default)
    Yaml,
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a YAML configuration
pub fn parse_yaml(content: &str) -> Result<BroadcastPlan, BridgeError> {
    serde_yaml::from_str(content).map_err(|e| BridgeError::ConfigParse {
        message: format!("YAML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a TOML configuration
pub fn parse_toml(content: &str) -> Result<BroadcastPlan, BridgeError> {
    toml::from_str(content).map_err(|e| BridgeError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON configuration
pub fn parse_json(content: &str) -> Result<BroadcastPlan, BridgeError> {
    serde_json::from_str(content).map_err(|e| BridgeError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<BroadcastPlan, BridgeError> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
