use thiserror::Error;

/// Errors returned by the chat transport. A failed call never counts as delivered.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API rejected the call (`"ok": false` or a non-2xx status).
    #[error("Telegram API error on {method} (status {status}): {description}")]
    Api {
        method: String,
        status: u16,
        description: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored message ids must be Bot API integers.
    #[error("invalid Telegram message id \"{0}\"")]
    InvalidMessageId(String),

    #[error("invalid Telegram API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
