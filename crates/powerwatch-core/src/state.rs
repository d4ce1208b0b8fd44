use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The last notification issued for the monitored address.
///
/// `published_at` and `last_update_hash` are only ever written together with
/// `message_id` after the transport acknowledged a send or edit. The default
/// value stands for "nothing was ever published".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationState {
    #[serde(
        default,
        alias = "message_id",
        deserialize_with = "deserialize_message_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,
    #[serde(default)]
    pub is_outage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_hash: Option<String>,
}

impl NotificationState {
    /// State after a successful publish.
    #[must_use]
    pub fn published(
        message_id: String,
        is_outage: bool,
        published_at: NaiveDate,
        last_update_hash: String,
    ) -> Self {
        Self {
            message_id: Some(message_id),
            is_outage,
            published_at: Some(published_at),
            last_update_hash: Some(last_update_hash),
        }
    }

    #[must_use]
    pub fn has_live_message(&self) -> bool {
        self.message_id.is_some()
    }

    /// `true` when the live message currently reports an outage.
    #[must_use]
    pub fn reports_outage(&self) -> bool {
        self.is_outage && self.has_live_message()
    }
}

/// Accepts both string and numeric ids; Telegram hands out integers.
fn deserialize_message_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(
        Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }),
    )
}
