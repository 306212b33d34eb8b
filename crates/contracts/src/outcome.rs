//! DispatchOutcome - Dispatcher output

use std::fmt;

use serde::Serialize;

/// Result of one destination's request, independent of the others
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    /// Destination name from the plan
    pub destination: String,

    /// Fully resolved request URL
    pub url: String,

    /// What happened to this destination's request
    pub status: DispatchStatus,
}

/// Per-destination request status
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchStatus {
    /// The destination answered; status line text recorded verbatim
    Responded { code: u16, text: String },

    /// Request construction or transport failure
    Failed { reason: String },
}

impl DispatchOutcome {
    /// True only for a 2xx response
    pub fn is_success(&self) -> bool {
        matches!(&self.status, DispatchStatus::Responded { code, .. } if (200..300).contains(code))
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Responded { text, .. } => write!(f, "{text}"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: DispatchStatus) -> DispatchOutcome {
        DispatchOutcome {
            destination: "listing".into(),
            url: "https://listing.example.com/stats".into(),
            status,
        }
    }

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(outcome(DispatchStatus::Responded {
            code: 200,
            text: "200 OK".into()
        })
        .is_success());
        assert!(outcome(DispatchStatus::Responded {
            code: 204,
            text: "204 No Content".into()
        })
        .is_success());
        assert!(!outcome(DispatchStatus::Responded {
            code: 401,
            text: "401 Unauthorized".into()
        })
        .is_success());
        assert!(!outcome(DispatchStatus::Failed {
            reason: "connection refused".into()
        })
        .is_success());
    }

    #[test]
    fn status_display() {
        assert_eq!(
            DispatchStatus::Responded {
                code: 200,
                text: "200 OK".into()
            }
            .to_string(),
            "200 OK"
        );
        assert_eq!(
            DispatchStatus::Failed {
                reason: "timed out".into()
            }
            .to_string(),
            "failed: timed out"
        );
    }
}
