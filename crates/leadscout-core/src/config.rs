use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // The single static credential this tool depends on. Missing key aborts
    // before any network call.
    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"));

    let bind_addr = parse_addr("LEADSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("LEADSCOUT_DATA_DIR", "./data"));

    let request_timeout_secs = parse_u64("LEADSCOUT_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("LEADSCOUT_USER_AGENT", "leadscout/0.1 (lead-generation)");
    let detail_delay_ms = parse_u64("LEADSCOUT_DETAIL_DELAY_MS", "100")?;
    let page_token_delay_ms = parse_u64("LEADSCOUT_PAGE_TOKEN_DELAY_MS", "2000")?;
    let email_page_delay_ms = parse_u64("LEADSCOUT_EMAIL_PAGE_DELAY_MS", "1000")?;
    let email_max_pages = parse_usize("LEADSCOUT_EMAIL_MAX_PAGES", "3")?;
    let run_timeout_secs = parse_u64("LEADSCOUT_RUN_TIMEOUT_SECS", "1800")?;

    Ok(AppConfig {
        places_api_key,
        env,
        bind_addr,
        log_level,
        data_dir,
        request_timeout_secs,
        user_agent,
        detail_delay_ms,
        page_token_delay_ms,
        email_page_delay_ms,
        email_max_pages,
        run_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
