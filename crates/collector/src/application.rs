//! ApplicationClient - authoritative guild count from the platform API
//!
//! Alternative deployment variant: instead of aggregating shard records,
//! ask the bot application metadata endpoint for its live guild count.

use contracts::{AggregateStats, BridgeError, SourceConfig};
use serde::Deserialize;
use tracing::debug;

/// Bot application metadata returned by the platform
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationInfo {
    /// Application id
    pub id: String,

    /// Application name
    pub name: String,

    /// Live guild count; its absence makes the aggregate uncomputable
    #[serde(default)]
    pub approximate_guild_count: Option<u64>,
}

impl ApplicationInfo {
    /// Aggregate view of the metadata
    ///
    /// The shard count is unknowable in this variant and reported as zero.
    ///
    /// # Errors
    /// A missing guild count is a fatal precondition.
    pub fn to_stats(&self) -> Result<AggregateStats, BridgeError> {
        let server_count =
            self.approximate_guild_count
                .ok_or_else(|| BridgeError::MetadataMissingField {
                    field: "approximate_guild_count".into(),
                })?;

        Ok(AggregateStats {
            server_count,
            shard_count: 0,
        })
    }
}

/// Client for the application metadata endpoint
pub struct ApplicationClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl ApplicationClient {
    /// Create a client from the source configuration
    pub fn new(config: &SourceConfig) -> Result<Self, BridgeError> {
        let token = config
            .bot_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                BridgeError::config_validation(
                    "source.bot_token",
                    "application source requires a bot token",
                )
            })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("shardcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BridgeError::metadata_fetch(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch the bot application metadata
    ///
    /// # Errors
    /// Transport failures, non-2xx responses, and undecodable bodies are
    /// all fatal to the run.
    pub async fn fetch_application(&self) -> Result<ApplicationInfo, BridgeError> {
        let url = format!("{}/api/v10/applications/@me", self.api_base);

        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bot {}", self.token),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| BridgeError::metadata_fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::metadata_fetch(format!(
                "{url} returned {status}"
            )));
        }

        let info: ApplicationInfo = response
            .json()
            .await
            .map_err(|e| BridgeError::metadata_fetch(format!("undecodable response: {e}")))?;

        debug!(id = %info.id, name = %info.name, "Fetched application metadata");
        Ok(info)
    }
}
