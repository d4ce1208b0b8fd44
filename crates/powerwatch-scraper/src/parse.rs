//! Parsing helpers for the shutdowns page and its AJAX response.

use std::sync::LazyLock;

use powerwatch_core::{HouseRecord, RawStatus};
use regex::Regex;
use serde::Deserialize;

use crate::error::FetchError;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\s[^>]*>").expect("valid meta regex"));
static CSRF_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bname\s*=\s*["']csrf-token["']"#).expect("valid csrf name regex")
});
static CONTENT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bcontent\s*=\s*["']([^"']*)["']"#).expect("valid content regex")
});

/// Extract the `content` of `<meta name="csrf-token">`, in either attribute order.
#[must_use]
pub fn extract_csrf_token(html: &str) -> Option<String> {
    META_TAG
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| CSRF_NAME.is_match(tag))
        .find_map(|tag| CONTENT_ATTR.captures(tag))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|token| !token.is_empty())
}

/// Heuristic for anti-bot interstitials served with a 200 status.
pub(crate) fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_incapsula = lowered.contains("_incapsula_resource") || lowered.contains("incapsula incident");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");

    has_cloudflare_banner
        || has_challenge_platform
        || has_incapsula
        || (has_just_a_moment && has_cookie_gate)
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    /// Object keyed by house number; the provider sends `[]` when the street
    /// has no records.
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default, rename = "updateTimestamp")]
    update_timestamp: Option<String>,
}

/// Map the provider's `getHomeNum` response to a [`RawStatus`] for `house`.
///
/// # Errors
///
/// Returns [`FetchError::Deserialize`] if `body` is not a JSON object of the
/// expected envelope.
pub fn status_from_response(body: &str, house: &str) -> Result<RawStatus, FetchError> {
    let response: ProviderResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Deserialize {
            context: format!("getHomeNum response for house {house}"),
            source: e,
        })?;

    let record = response
        .data
        .get(house.trim())
        .filter(|rec| rec.is_object())
        .map(|rec| {
            let field = |name: &str| rec.get(name).and_then(serde_json::Value::as_str);
            HouseRecord::from_provider(
                field("sub_type"),
                field("start_date"),
                field("end_date"),
                field("type"),
            )
        });

    let update_timestamp = response
        .update_timestamp
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty());

    Ok(RawStatus {
        house: record,
        update_timestamp,
    })
}
