//! Layered error definitions
//!
//! Categorized by source: config / store / metadata / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum BridgeError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Store Errors =====
    /// Store connection error
    #[error("store connection error: {message}")]
    StoreConnection { message: String },

    /// Store read error
    #[error("store read error: {message}")]
    StoreRead { message: String },

    /// Record decode error
    #[error("record decode error for hash key '{key}': {message}")]
    RecordDecode { key: String, message: String },

    // ===== Metadata Errors =====
    /// Application metadata fetch error
    #[error("application metadata fetch error: {message}")]
    MetadataFetch { message: String },

    /// Application metadata is missing a required field
    #[error("application metadata missing field '{field}'")]
    MetadataMissingField { field: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create store connection error
    pub fn store_connection(message: impl Into<String>) -> Self {
        Self::StoreConnection {
            message: message.into(),
        }
    }

    /// Create store read error
    pub fn store_read(message: impl Into<String>) -> Self {
        Self::StoreRead {
            message: message.into(),
        }
    }

    /// Create record decode error
    pub fn record_decode(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordDecode {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create application metadata fetch error
    pub fn metadata_fetch(message: impl Into<String>) -> Self {
        Self::MetadataFetch {
            message: message.into(),
        }
    }
}
