use thiserror::Error;

/// Failures while fetching the provider status. Any of these ends the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid shutdowns page URL \"{url}\": {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("no csrf-token meta tag on {url}")]
    MissingCsrfToken { url: String },

    #[error("bot challenge served instead of {url}")]
    BotChallenge { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
