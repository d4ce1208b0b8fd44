use std::path::PathBuf;

use chrono_tz::Tz;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_SHUTDOWNS_PAGE: &str = "https://www.dtek-krem.com.ua/ua/shutdowns";
const DEFAULT_STATE_PATH: &str = "./data/last_message.json";
const DEFAULT_SITE_TZ: &str = "Europe/Kyiv";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables already in the process.
///
/// Does not load `.env` files; the binary does that once at startup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve only the state file location (`POWERWATCH_STATE_PATH`).
///
/// Needs none of the required variables, so maintenance commands work on a
/// partly configured host. Does not load `.env` files.
#[must_use]
pub fn state_path_from_env() -> PathBuf {
    resolve_state_path(&|key: &str| std::env::var(key))
}

fn resolve_state_path<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("POWERWATCH_STATE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{raw}\""),
        })
    };

    let telegram_bot_token = require("TELEGRAM_BOT_TOKEN")?;
    let telegram_chat_id = require("TELEGRAM_CHAT_ID")?;
    let city = require("POWERWATCH_CITY")?;
    let street = require("POWERWATCH_STREET")?;
    let house = require("POWERWATCH_HOUSE")?;

    let env = parse_environment(&or_default("POWERWATCH_ENV", "development"))?;
    let log_level = or_default("POWERWATCH_LOG_LEVEL", "info");
    let telegram_api_base = or_default("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE);
    let shutdowns_page = or_default("POWERWATCH_SHUTDOWNS_PAGE", DEFAULT_SHUTDOWNS_PAGE);
    let state_path = resolve_state_path(&lookup);
    let keywords_path = lookup("POWERWATCH_KEYWORDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let tz_raw = or_default("POWERWATCH_SITE_TZ", DEFAULT_SITE_TZ);
    let site_tz = tz_raw
        .trim()
        .parse::<Tz>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "POWERWATCH_SITE_TZ".to_string(),
            reason: format!("unknown IANA time zone \"{tz_raw}\": {e}"),
        })?;

    let recovery_delay_min_secs = parse_u64("POWERWATCH_RECOVERY_DELAY_MIN_SECS", "300")?;
    let recovery_delay_max_secs = parse_u64("POWERWATCH_RECOVERY_DELAY_MAX_SECS", "600")?;
    if recovery_delay_max_secs < recovery_delay_min_secs {
        return Err(ConfigError::InvalidEnvVar {
            var: "POWERWATCH_RECOVERY_DELAY_MAX_SECS".to_string(),
            reason: format!(
                "must be >= POWERWATCH_RECOVERY_DELAY_MIN_SECS ({recovery_delay_min_secs})"
            ),
        });
    }

    let new_message_each_day = parse_flag("POWERWATCH_NEW_MESSAGE_EACH_DAY", "false")?;
    let request_timeout_secs = parse_u64("POWERWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("POWERWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let schedule = or_default("POWERWATCH_SCHEDULE", "0 */10 * * * *");

    Ok(AppConfig {
        env,
        log_level,
        telegram_bot_token,
        telegram_chat_id,
        telegram_api_base,
        city,
        street,
        house,
        shutdowns_page,
        state_path,
        keywords_path,
        site_tz,
        recovery_delay_min_secs,
        recovery_delay_max_secs,
        new_message_each_day,
        request_timeout_secs,
        user_agent,
        schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POWERWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
