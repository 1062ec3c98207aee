use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load configuration with the two model labels supplied by the caller.
///
/// Calls `dotenvy::dotenv().ok()` first; the remaining settings still come
/// from the environment. The labels arrive as CLI flags (which themselves
/// fall back to `TRADEIN_PURCHASE_DEVICE_MODEL` / `TRADEIN_SELECTED_MODEL`).
///
/// # Errors
///
/// Returns `ConfigError` if a label is blank or another value is invalid.
pub fn load_app_config_with_models(
    purchase_device_model: &str,
    selected_model: &str,
) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(override_models(
        |key| std::env::var(key),
        purchase_device_model,
        selected_model,
    ))
}

/// Wraps `lookup` so the two model label variables resolve to fixed values.
fn override_models<'a, F>(
    lookup: F,
    purchase_device_model: &'a str,
    selected_model: &'a str,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key| match key {
        "TRADEIN_PURCHASE_DEVICE_MODEL" => Ok(purchase_device_model.to_string()),
        "TRADEIN_SELECTED_MODEL" => Ok(selected_model.to_string()),
        _ => lookup(key),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be non-empty".to_string(),
            });
        }
        Ok(value)
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

    let purchase_device_model = require("TRADEIN_PURCHASE_DEVICE_MODEL")?;
    let selected_model = require("TRADEIN_SELECTED_MODEL")?;

    let webdriver_url = or_default("TRADEIN_WEBDRIVER_URL", "http://localhost:4444");
    let site_path = PathBuf::from(or_default("TRADEIN_SITE_PATH", "./config/site.yaml"));
    let output_dir = PathBuf::from(or_default("TRADEIN_OUTPUT_DIR", "."));
    let log_level = or_default("TRADEIN_LOG_LEVEL", "info");

    let wait_timeout_secs = parse_u64("TRADEIN_WAIT_TIMEOUT_SECS", "20")?;
    let price_timeout_secs = parse_u64("TRADEIN_PRICE_TIMEOUT_SECS", "5")?;
    let settle_delay_ms = parse_u64("TRADEIN_SETTLE_DELAY_MS", "3000")?;

    if wait_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRADEIN_WAIT_TIMEOUT_SECS".to_string(),
            reason: "bounded wait must be at least one second".to_string(),
        });
    }

    Ok(AppConfig {
        purchase_device_model,
        selected_model,
        webdriver_url,
        site_path,
        output_dir,
        log_level,
        wait_timeout_secs,
        price_timeout_secs,
        settle_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
