//! HTTP client for the Telegram Bot API.
//!
//! Only `sendMessage` and `editMessageText` are used. Every call checks both
//! the HTTP status and the `"ok"` field of the JSON envelope; either failing
//! surfaces as [`TransportError::Api`] with the API's `description`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::TransportError;
use crate::transport::ChatTransport;
use crate::types::{
    ApiResponse, EditMessageTextRequest, MessageResult, SendMessageRequest, SentMessage,
};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "HTML";

/// Client bound to one bot token and one chat.
pub struct TelegramClient {
    client: Client,
    base_url: Url,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    /// Creates a client pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bot_token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        Self::with_base_url(bot_token, chat_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TransportError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        bot_token: &str,
        chat_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("powerwatch/0.1 (outage-notifier)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TransportError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            bot_token: bot_token.to_owned(),
            chat_id: chat_id.to_owned(),
        })
    }

    fn method_url(&self, method: &str) -> Result<Url, TransportError> {
        self.base_url
            // "./" keeps `bot<id>:<secret>` from parsing as a URL scheme.
            .join(&format!("./bot{}/{method}", self.bot_token))
            .map_err(|e| TransportError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// POSTs `payload` to `method` and returns the acknowledged message.
    ///
    /// The request URL embeds the bot token, so reqwest errors are stripped of
    /// their URL before being surfaced.
    async fn call<P: Serialize + Sync>(
        &self,
        method: &str,
        payload: &P,
    ) -> Result<SentMessage, TransportError> {
        let url = self.method_url(method)?;
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Http(e.without_url()))?;

        let envelope: ApiResponse<MessageResult> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(TransportError::Deserialize {
                    context: method.to_owned(),
                    source: e,
                })
            }
            Err(_) => {
                return Err(TransportError::Api {
                    method: method.to_owned(),
                    status: status.as_u16(),
                    description: body.chars().take(200).collect(),
                })
            }
        };

        if !status.is_success() || !envelope.ok {
            return Err(TransportError::Api {
                method: method.to_owned(),
                status: status.as_u16(),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_owned()),
            });
        }

        let result = envelope.result.ok_or_else(|| TransportError::Api {
            method: method.to_owned(),
            status: status.as_u16(),
            description: "acknowledged without a result".to_owned(),
        })?;

        Ok(SentMessage {
            id: result.message_id.to_string(),
        })
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<SentMessage, TransportError> {
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: PARSE_MODE,
            disable_web_page_preview: true,
        };
        let sent = self.call("sendMessage", &payload).await?;
        tracing::info!(message_id = %sent.id, "telegram message sent");
        Ok(sent)
    }

    async fn edit_message(
        &self,
        message_id: &str,
        text: &str,
    ) -> Result<SentMessage, TransportError> {
        let numeric = message_id
            .trim()
            .parse::<i64>()
            .map_err(|_| TransportError::InvalidMessageId(message_id.to_owned()))?;

        let payload = EditMessageTextRequest {
            chat_id: &self.chat_id,
            message_id: numeric,
            text,
            parse_mode: PARSE_MODE,
            disable_web_page_preview: true,
        };
        let edited = self.call("editMessageText", &payload).await?;
        tracing::info!(message_id = %edited.id, "telegram message edited");
        Ok(edited)
    }
}
