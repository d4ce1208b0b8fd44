use async_trait::async_trait;
use powerwatch_core::RawStatus;

use crate::error::FetchError;

/// Anything that can produce the current status sample for the monitored house.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<RawStatus, FetchError>;
}
