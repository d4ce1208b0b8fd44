use thiserror::Error;

use powerwatch_scraper::FetchError;
use powerwatch_telegram::TransportError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize notification state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A publish that did not complete.
///
/// On [`NotifyError::Transport`] nothing was written. [`NotifyError::Store`]
/// means the message went out but the new state could not be persisted.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("message delivered but state was not saved: {0}")]
    Store(#[from] StoreError),
}

/// Anything that ends a polling cycle early.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("state store failed: {0}")]
    Store(#[from] StoreError),
}
