//! Dispatcher - concurrent fan-out of one request per destination

use std::time::Duration;

use contracts::{AggregateStats, DestinationConfig, DispatchOutcome, DispatchStatus};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::error::DispatcherError;
use crate::request;

/// Concurrent per-destination dispatcher
///
/// One shared HTTP client; one task per destination, all spawned
/// together; the fan-in barrier waits for every task before returning.
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    /// Create a dispatcher
    ///
    /// `request_timeout` of None keeps the host stack's ambient default
    /// (effectively no timeout); a hung destination then stalls the
    /// barrier until it resolves.
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, DispatcherError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("shardcast/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DispatcherError::client_build(e.to_string()))?;

        Ok(Self { client })
    }

    /// Send the aggregate to every destination concurrently
    ///
    /// Exactly one request attempt per destination, no retries. No single
    /// outcome aborts the batch: construction and transport failures are
    /// recorded in that destination's outcome and the barrier still
    /// completes. Outcomes are returned in configuration order.
    #[instrument(
        name = "dispatch_all",
        skip(self, destinations),
        fields(destinations = destinations.len())
    )]
    pub async fn dispatch_all(
        &self,
        destinations: &[DestinationConfig],
        stats: AggregateStats,
    ) -> Vec<DispatchOutcome> {
        let handles: Vec<JoinHandle<DispatchOutcome>> = destinations
            .iter()
            .cloned()
            .map(|destination| {
                let client = self.client.clone();
                tokio::spawn(async move { send_to_destination(client, destination, stats).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, destination) in handles.into_iter().zip(destinations) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                // A panicked task is isolated like any other failure
                Err(e) => DispatchOutcome {
                    destination: destination.name.clone(),
                    url: destination.endpoint.clone(),
                    status: DispatchStatus::Failed {
                        reason: format!("dispatch task failed: {e}"),
                    },
                },
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Build and send one destination's request, producing its outcome
async fn send_to_destination(
    client: reqwest::Client,
    destination: DestinationConfig,
    stats: AggregateStats,
) -> DispatchOutcome {
    let prepared = match request::prepare(&destination, stats) {
        Ok(prepared) => prepared,
        Err(reason) => {
            error!(destination = %destination.name, %reason, "Request construction failed");
            return DispatchOutcome {
                destination: destination.name,
                url: destination.endpoint,
                status: DispatchStatus::Failed { reason },
            };
        }
    };

    let name = prepared.destination.clone();
    let url = prepared.url.to_string();

    match prepared
        .into_builder(&client, &destination.token)
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status();
            // Status line text recorded verbatim; the body is never parsed
            let text = status.to_string();
            info!(destination = %name, url = %url, status = %text, "Destination answered");
            DispatchOutcome {
                destination: name,
                url,
                status: DispatchStatus::Responded {
                    code: status.as_u16(),
                    text,
                },
            }
        }
        Err(e) => {
            let reason = e.to_string();
            error!(destination = %name, url = %url, error = %reason, "Dispatch failed");
            DispatchOutcome {
                destination: name,
                url,
                status: DispatchStatus::Failed { reason },
            }
        }
    }
}
