//! HTTP client for the provider's shutdowns page.
//!
//! The page is a server-rendered form guarded by a CSRF token bound to the
//! session cookie. One fetch is two requests: GET the page (cookie jar
//! picks up the session, the token is read from `<meta name="csrf-token">`),
//! then POST the `getHomeNum` form to `/ua/ajax` with that token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use powerwatch_core::RawStatus;
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::parse::{extract_csrf_token, looks_like_bot_challenge, status_from_response};
use crate::source::StatusSource;

const AJAX_PATH: &str = "/ua/ajax";

/// The fixed address being monitored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownsQuery {
    pub city: String,
    pub street: String,
    pub house: String,
}

pub struct ShutdownsClient {
    client: Client,
    page_url: Url,
    ajax_url: Url,
    query: ShutdownsQuery,
    site_tz: Tz,
}

impl ShutdownsClient {
    /// Creates a client for the shutdowns page at `page_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPageUrl`] if `page_url` does not parse, or
    /// [`FetchError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        page_url: &str,
        query: ShutdownsQuery,
        timeout_secs: u64,
        user_agent: &str,
        site_tz: Tz,
    ) -> Result<Self, FetchError> {
        let parsed = Url::parse(page_url).map_err(|e| FetchError::InvalidPageUrl {
            url: page_url.to_owned(),
            reason: e.to_string(),
        })?;
        let ajax_url = parsed
            .join(AJAX_PATH)
            .map_err(|e| FetchError::InvalidPageUrl {
                url: page_url.to_owned(),
                reason: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            page_url: parsed,
            ajax_url,
            query,
            site_tz,
        })
    }

    /// Fetches the current status sample for the configured house.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::UnexpectedStatus`] on any non-2xx response.
    /// - [`FetchError::BotChallenge`] / [`FetchError::MissingCsrfToken`] when
    ///   the page carries no usable token.
    /// - [`FetchError::Deserialize`] when the AJAX body is not the expected JSON.
    pub async fn fetch(&self) -> Result<RawStatus, FetchError> {
        let html = self.fetch_page().await?;

        let token = extract_csrf_token(&html).ok_or_else(|| {
            let url = self.page_url.to_string();
            if looks_like_bot_challenge(&html) {
                FetchError::BotChallenge { url }
            } else {
                FetchError::MissingCsrfToken { url }
            }
        })?;

        let body = self.post_home_num(&token).await?;
        let status = status_from_response(&body, &self.query.house)?;

        tracing::debug!(
            house = %self.query.house,
            has_record = status.house.is_some(),
            update_timestamp = status.update_timestamp.as_deref().unwrap_or("-"),
            "fetched provider status"
        );
        Ok(status)
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.page_url.clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "uk-UA,uk;q=0.9,en;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.page_url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn post_home_num(&self, csrf_token: &str) -> Result<String, FetchError> {
        let update_fact = Utc::now()
            .with_timezone(&self.site_tz)
            .format("%d.%m.%Y, %H:%M:%S")
            .to_string();

        let form = [
            ("method", "getHomeNum"),
            ("data[0][name]", "city"),
            ("data[0][value]", self.query.city.as_str()),
            ("data[1][name]", "street"),
            ("data[1][value]", self.query.street.as_str()),
            ("data[2][name]", "updateFact"),
            ("data[2][value]", update_fact.as_str()),
        ];

        let response = self
            .client
            .post(self.ajax_url.clone())
            .header("x-requested-with", "XMLHttpRequest")
            .header("x-csrf-token", csrf_token)
            .header(reqwest::header::REFERER, self.page_url.as_str())
            .header(
                reqwest::header::ACCEPT,
                "application/json, text/javascript, */*; q=0.01",
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.ajax_url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl StatusSource for ShutdownsClient {
    async fn fetch_status(&self) -> Result<RawStatus, FetchError> {
        self.fetch().await
    }
}
