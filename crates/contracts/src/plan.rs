//! BroadcastPlan - Config Loader output
//!
//! Describes a complete broadcast run: bot identity, aggregate source,
//! store connection parameters, and destination routing.

use serde::{Deserialize, Serialize};

use crate::template;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlanVersion {
    #[default]
    V1,
}

/// Complete broadcast configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastPlan {
    /// Configuration version
    #[serde(default)]
    pub version: PlanVersion,

    /// Bot identifier, substituted for `@bot_id@` in endpoint templates
    pub bot_id: String,

    /// Aggregate source selection
    #[serde(default)]
    pub source: SourceConfig,

    /// Shared store connection parameters
    #[serde(default)]
    pub store: StoreConfig,

    /// Destination list
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

/// Which collaborator produces the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Per-shard records read from the shared store
    #[default]
    Store,
    /// Single authoritative guild count from the application metadata endpoint
    Application,
}

/// Aggregate source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source variant
    #[serde(default)]
    pub kind: SourceKind,

    /// API base for the application metadata endpoint
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bot token for the application metadata endpoint (required when
    /// `kind = application`)
    #[serde(default)]
    pub bot_token: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Store,
            api_base: default_api_base(),
            bot_token: None,
        }
    }
}

fn default_api_base() -> String {
    "https://discord.com".to_string()
}

/// Shared store (Redis) connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store host
    #[serde(default = "default_store_host")]
    pub host: String,

    /// Store port
    #[serde(default = "default_store_port")]
    pub port: u16,

    /// Optional password
    #[serde(default)]
    pub password: Option<String>,

    /// Database index
    #[serde(default)]
    pub db: i64,

    /// Hash key holding one record per shard id
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_store_host(),
            port: default_store_port(),
            password: None,
            db: 0,
            key: default_store_key(),
        }
    }
}

fn default_store_host() -> String {
    "localhost".to_string()
}

fn default_store_port() -> u16 {
    6379
}

fn default_store_key() -> String {
    "shard-stats".to_string()
}

impl StoreConfig {
    /// Build the store connection URL
    pub fn connection_url(&self) -> String {
        if let Some(password) = &self.password {
            format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.db
            )
        } else {
            format!("redis://{}:{}/{}", self.host, self.port, self.db)
        }
    }

    /// Host:port pair for log output
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One statistics-listing destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Destination name (used for logging and outcomes)
    pub name: String,

    /// Endpoint URL template; may embed `@bot_id@` and count placeholders
    pub endpoint: String,

    /// Raw `Authorization` header value the destination expects
    pub token: String,

    /// Body template; the default pattern is used when absent or empty
    #[serde(default)]
    pub body_template: Option<String>,

    /// HTTP method, uppercased at request-build time
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "POST".to_string()
}

impl DestinationConfig {
    /// Whether this destination carries the counts in its URL
    ///
    /// A count placeholder in the endpoint selects query/path delivery:
    /// counts substituted into the URL, request sent without a body.
    pub fn uses_query_mode(&self) -> bool {
        template::has_count_placeholder(&self.endpoint)
    }

    /// Body template with the default pattern applied
    pub fn effective_body_template(&self) -> &str {
        match self.body_template.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => template::DEFAULT_BODY_TEMPLATE,
        }
    }
}

impl BroadcastPlan {
    /// Resolve `@bot_id@` in every endpoint template
    ///
    /// Applied exactly once, at config-load time. Count placeholders are
    /// left for request-build time since the aggregate is not known yet.
    pub fn resolve_endpoints(&mut self) {
        for destination in &mut self.destinations {
            destination.endpoint = template::resolve_bot_id(&destination.endpoint, &self.bot_id);
        }
    }
}
