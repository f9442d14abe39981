//! Unified error types for the indexer client.

use std::fmt;

use thiserror::Error;

use crate::network::NetworkId;

/// Top-level error type for the indexer client.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be resolved, read, written, or parsed.
    #[error("config: {0}")]
    Config(String),

    /// No indexer endpoint is registered for the network.
    #[error("no indexer endpoint configured for network {0}")]
    UnresolvedEndpoint(NetworkId),

    /// The indexer request failed.
    #[error(transparent)]
    Indexer(#[from] IndexerError),
}

impl Error {
    /// Creates a [`Error::Config`] from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a [`Error::Config`] from a message and its underlying cause.
    pub fn config_with(message: impl fmt::Display, source: impl fmt::Display) -> Self {
        Self::Config(format!("{message}: {source}"))
    }

    /// Message reported by the indexer, if this is an indexer failure.
    #[must_use]
    pub fn indexer_message(&self) -> Option<&str> {
        match self {
            Self::Indexer(err) => Some(&err.message),
            _ => None,
        }
    }
}

/// Normalized failure of a single indexer request.
///
/// Transport failures, non-2xx replies and undecodable bodies all collapse
/// into this one shape; the underlying `reqwest` error is logged, not kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed when querying TzKT API: {message}")]
pub struct IndexerError {
    /// HTTP status of the reply, `None` when no reply was received.
    pub status: Option<u16>,
    /// Indexer-reported message, or a generic description.
    pub message: String,
}

impl IndexerError {
    pub(crate) const TRANSPORT_MESSAGE: &'static str = "network request failed";

    pub(crate) fn transport() -> Self {
        Self {
            status: None,
            message: Self::TRANSPORT_MESSAGE.to_owned(),
        }
    }

    pub(crate) fn malformed(status: u16) -> Self {
        Self {
            status: Some(status),
            message: "malformed response body".to_owned(),
        }
    }

    /// Builds the error for a non-2xx reply.
    ///
    /// Prefers the JSON `message` field, then the raw body, then the
    /// canonical reason of the status.
    pub(crate) fn server(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });
        Self {
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn server_message_is_taken_verbatim() {
        let err = IndexerError::server(StatusCode::BAD_REQUEST, r#"{"message":"boom"}"#);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "boom");
        assert_eq!(err.to_string(), "failed when querying TzKT API: boom");
    }

    #[test]
    fn server_without_json_falls_back_to_body_then_reason() {
        let err = IndexerError::server(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.message, "upstream down");

        let err = IndexerError::server(StatusCode::NOT_FOUND, "");
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn indexer_message_only_for_indexer_errors() {
        let err = Error::from(IndexerError::transport());
        assert_eq!(err.indexer_message(), Some("network request failed"));
        assert_eq!(Error::config("x").indexer_message(), None);
    }
}
