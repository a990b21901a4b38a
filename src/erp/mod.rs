//! ERP Integration Module
//!
//! This module talks to the external ERP system of record:
//! - Document models (item details, Sales Order, read-back order)
//! - The authenticated HTTP client

pub mod client;
pub mod models;

use thiserror::Error;

pub use client::ErpClient;
pub use models::{ItemDetails, RemoteSalesOrder, SalesOrderDoc};

#[derive(Debug, Error)]
pub enum ErpError {
    /// Connection failure, timeout, or an unreadable body.
    #[error("ERP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The ERP answered with a non-success status.
    #[error("ERP returned status {status}")]
    Status { status: u16, message: Option<String> },

    /// The body was not the JSON shape expected.
    #[error("invalid JSON from ERP: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("invalid ERP configuration: {0}")]
    Config(String),
}

impl ErpError {
    /// Message for callers: the ERP's own message when it sent one.
    pub fn caller_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Status { status, .. } => format!("{fallback} (status {status})"),
            Self::Transport(e) if e.is_timeout() => format!("{fallback}: request timed out"),
            Self::Transport(_) => format!("{fallback}: ERP unreachable"),
            Self::InvalidBody(_) => format!("{fallback}: invalid JSON from ERP"),
            Self::Config(_) => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_wins_over_fallback() {
        let err = ErpError::Status {
            status: 417,
            message: Some("Invalid customer".into()),
        };
        assert_eq!(err.caller_message("Failed"), "Invalid customer");

        let err = ErpError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.caller_message("Failed"), "Failed (status 500)");
    }
}
