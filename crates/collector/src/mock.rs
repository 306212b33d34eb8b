//! Mock record source
//!
//! For pipeline tests without a live store.

use contracts::{BridgeError, RecordSource, ShardRecord};

/// Record source backed by a fixed record set or an injected failure
pub struct MockRecordSource {
    records: Vec<ShardRecord>,
    failure: Option<String>,
}

impl MockRecordSource {
    /// Source that yields the given records
    pub fn with_records(records: Vec<ShardRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Source that fails every fetch
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl RecordSource for MockRecordSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_all(&mut self) -> Result<Vec<ShardRecord>, BridgeError> {
        match &self.failure {
            Some(message) => Err(BridgeError::store_read(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}
