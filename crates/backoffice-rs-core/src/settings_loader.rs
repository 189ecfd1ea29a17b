//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults; partial files are fine).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `BACKOFFICE_DEBUG` | `debug` |
//! | `BACKOFFICE_LOG_LEVEL` | `log_level` |
//! | `BACKOFFICE_LOCALE` | `locale` |
//! | `BACKOFFICE_CURRENCY` | `currency` |
//! | `BACKOFFICE_ITEMS_PER_PAGE` | `items_per_page` |
//! | `BACKOFFICE_API_BASE_URL` | `api_base_url` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use backoffice_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/dashboard.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::BackofficeError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, BackofficeError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| BackofficeError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, BackofficeError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BackofficeError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, BackofficeError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BackofficeError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, BackofficeError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Unparseable numeric overrides are ignored with a warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("BACKOFFICE_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("BACKOFFICE_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("BACKOFFICE_LOCALE") {
        settings.locale = val;
    }

    if let Some(val) = lookup("BACKOFFICE_CURRENCY") {
        settings.currency = val.to_uppercase();
    }

    if let Some(val) = lookup("BACKOFFICE_ITEMS_PER_PAGE") {
        match val.parse::<usize>() {
            Ok(n) if n > 0 => settings.items_per_page = n,
            _ => tracing::warn!(value = %val, "ignoring invalid BACKOFFICE_ITEMS_PER_PAGE"),
        }
    }

    if let Some(val) = lookup("BACKOFFICE_API_BASE_URL") {
        settings.api_base_url = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, kind: &str) -> Result<String, BackofficeError> {
    std::fs::read_to_string(path).map_err(|e| {
        BackofficeError::ConfigurationError(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    overrides: serde_json::Value,
    kind: &str,
) -> Result<Settings, BackofficeError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        BackofficeError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overrides);
    let settings: Settings = serde_json::from_value(merged).map_err(|e| {
        BackofficeError::ConfigurationError(format!(
            "Failed to deserialize settings from {kind}: {e}"
        ))
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
