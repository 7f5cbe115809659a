//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{MonitorConfig, StartPolicy};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration: defaults, then the optional file, then
/// environment variables. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => MonitorConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` is injected so tests can supply a fixed environment.
pub fn apply_env_overrides<F>(config: &mut MonitorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let string_vars: [(&str, &mut String); 7] = [
        ("MTNODE_BASE_URL", &mut config.chain.base_url),
        ("WATCH_VALIDATOR_ADDRESS", &mut config.validator.watch_address),
        ("TWILIO_SID", &mut config.messaging.account_sid),
        ("TWILIO_TOKEN", &mut config.messaging.auth_token),
        ("FROM_PHONE", &mut config.messaging.from),
        ("ALERT_PHONE", &mut config.messaging.to),
        ("TWILIO_API_URL", &mut config.messaging.api_base_url),
    ];
    for (var, slot) in string_vars {
        if let Some(value) = lookup(var) {
            *slot = value;
        }
    }

    if let Some(value) = lookup("CHECK_FREQUENCY") {
        config.monitor.poll_interval_ms = parse_u64("CHECK_FREQUENCY", &value)?;
    }
    if let Some(value) = lookup("DEBOUNCE_SECS") {
        config.monitor.debounce_secs = parse_u64("DEBOUNCE_SECS", &value)?;
    }
    if let Some(value) = lookup("START_HEIGHT") {
        config.monitor.start = match value.trim() {
            "" | "tip" => StartPolicy::Tip,
            raw => match parse_u64("START_HEIGHT", raw)? {
                0 => StartPolicy::Tip,
                height => StartPolicy::Height(height),
            },
        };
    }
    if let Some(value) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(value).filter(|v| !v.trim().is_empty());
    }

    Ok(())
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
        var,
        reason: format!("'{}' ({})", value, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_populates_required_values() {
        let mut config = MonitorConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("MTNODE_BASE_URL", "http://node:1317"),
                ("WATCH_VALIDATOR_ADDRESS", "ABC123"),
                ("CHECK_FREQUENCY", "15000"),
                ("TWILIO_SID", "AC9"),
                ("TWILIO_TOKEN", "tok"),
                ("ALERT_PHONE", "+1999"),
                ("FROM_PHONE", "+1888"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chain.base_url, "http://node:1317");
        assert_eq!(config.validator.watch_address, "ABC123");
        assert_eq!(config.monitor.poll_interval_ms, 15000);
        assert_eq!(config.messaging.to, "+1999");
        assert_eq!(config.messaging.from, "+1888");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: MonitorConfig =
            toml::from_str("[chain]\nbase_url = \"http://file:1317\"\n").unwrap();
        apply_env_overrides(&mut config, env(&[("MTNODE_BASE_URL", "http://env:1317")])).unwrap();
        assert_eq!(config.chain.base_url, "http://env:1317");
    }

    #[test]
    fn test_start_height_policy() {
        let mut config = MonitorConfig::default();
        apply_env_overrides(&mut config, env(&[("START_HEIGHT", "420")])).unwrap();
        assert_eq!(config.monitor.start, StartPolicy::Height(420));

        apply_env_overrides(&mut config, env(&[("START_HEIGHT", "tip")])).unwrap();
        assert_eq!(config.monitor.start, StartPolicy::Tip);

        apply_env_overrides(&mut config, env(&[("START_HEIGHT", "420")])).unwrap();
        apply_env_overrides(&mut config, env(&[("START_HEIGHT", "0")])).unwrap();
        assert_eq!(config.monitor.start, StartPolicy::Tip);
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let mut config = MonitorConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("CHECK_FREQUENCY", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "CHECK_FREQUENCY", .. }));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_validation_error_lists_all_problems() {
        let err = ConfigError::Validation(vec![
            ValidationError::Missing("validator.watch_address"),
            ValidationError::Zero("monitor.poll_interval_ms"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: validator.watch_address is required, monitor.poll_interval_ms must be greater than zero"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = read_config_file(Path::new("does-not-exist-sigwatch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
