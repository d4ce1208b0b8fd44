//! Chat transport for powerwatch: one Telegram message, sent once and then edited.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::TelegramClient;
pub use error::TransportError;
pub use transport::ChatTransport;
pub use types::SentMessage;
