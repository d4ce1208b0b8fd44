//! Shared types, configuration, and the pure outage logic for powerwatch.

pub mod app_config;
pub mod classify;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod keywords;
pub mod site_time;
pub mod state;
pub mod status;

pub use app_config::{AppConfig, Environment};
pub use classify::{classify, parse_provider_timestamp, OutageCategory, OutageSignal};
pub use config::{load_app_config_from_env, state_path_from_env};
pub use error::ConfigError;
pub use fingerprint::fingerprint;
pub use keywords::{load_keywords, ClassifierKeywords};
pub use site_time::SiteClock;
pub use state::NotificationState;
pub use status::{HouseRecord, RawStatus};
