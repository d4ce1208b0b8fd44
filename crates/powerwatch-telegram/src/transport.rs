use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::SentMessage;

/// Send/edit contract for the single live status message.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<SentMessage, TransportError>;

    async fn edit_message(&self, message_id: &str, text: &str)
        -> Result<SentMessage, TransportError>;
}
