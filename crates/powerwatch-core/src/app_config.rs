use std::path::PathBuf;

use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_base: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub shutdowns_page: String,
    pub state_path: PathBuf,
    pub keywords_path: Option<PathBuf>,
    pub site_tz: Tz,
    pub recovery_delay_min_secs: u64,
    pub recovery_delay_max_secs: u64,
    pub new_message_each_day: bool,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub schedule: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("telegram_bot_token", &"[redacted]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("city", &self.city)
            .field("street", &self.street)
            .field("house", &self.house)
            .field("shutdowns_page", &self.shutdowns_page)
            .field("state_path", &self.state_path)
            .field("keywords_path", &self.keywords_path)
            .field("site_tz", &self.site_tz)
            .field("recovery_delay_min_secs", &self.recovery_delay_min_secs)
            .field("recovery_delay_max_secs", &self.recovery_delay_max_secs)
            .field("new_message_each_day", &self.new_message_each_day)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("schedule", &self.schedule)
            .finish()
    }
}
