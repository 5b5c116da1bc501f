//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`OledSettings::default()`]
//! 2. If `~/.ssoled/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `SSOLED_*` environment variable overrides (highest priority)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::OledSettings;

/// Accepted `heartbeatIntervalMs` values, in milliseconds.
pub const HEARTBEAT_INTERVAL_RANGE: (u64, u64) = (100, 600_000);

/// Accepted `requestTimeoutMs` values, in milliseconds.
pub const REQUEST_TIMEOUT_RANGE: (u64, u64) = (100, 120_000);

/// Resolve the path to the settings file (`~/.ssoled/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ssoled").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<OledSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<OledSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Defaults merged with the settings file, without env overrides.
///
/// Out-of-range durations in the file are logged and reset to defaults.
pub fn load_file_layer(path: &Path) -> Result<OledSettings> {
    let defaults = serde_json::to_value(OledSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: OledSettings = serde_json::from_value(merged)?;
    enforce_ranges(&mut settings);
    Ok(settings)
}

/// Reset durations outside their accepted range to the defaults.
fn enforce_ranges(settings: &mut OledSettings) {
    let defaults = OledSettings::default();
    let check = |key: &str, value: &mut u64, (min, max): (u64, u64), default: u64| {
        if !(min..=max).contains(&*value) {
            warn!(key, value = *value, min, max, "setting out of range, using default");
            *value = default;
        }
    };
    check(
        "heartbeatIntervalMs",
        &mut settings.heartbeat_interval_ms,
        HEARTBEAT_INTERVAL_RANGE,
        defaults.heartbeat_interval_ms,
    );
    check(
        "requestTimeoutMs",
        &mut settings.request_timeout_ms,
        REQUEST_TIMEOUT_RANGE,
        defaults.request_timeout_ms,
    );
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `SSOLED_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut OledSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup` (the env var name is passed in).
///
/// Invalid values are logged and ignored, keeping the file/default value.
pub fn apply_overrides_from(settings: &mut OledSettings, lookup: impl Fn(&str) -> Option<String>) {
    let string = |name: &str| lookup(name).filter(|v| !v.is_empty());
    let number = |name: &str, (min, max): (u64, u64)| {
        let val = lookup(name)?;
        let parsed = parse_u64_range(&val, min, max);
        if parsed.is_none() {
            warn!(key = name, value = %val, "invalid integer env var, ignoring");
        }
        parsed
    };
    let boolean = |name: &str| {
        let val = lookup(name)?;
        let parsed = parse_bool(&val);
        if parsed.is_none() {
            warn!(key = name, value = %val, "invalid boolean env var, ignoring");
        }
        parsed
    };

    if let Some(v) = string("SSOLED_GAME") {
        settings.game = v;
    }
    if let Some(v) = string("SSOLED_DISPLAY_NAME") {
        settings.display_name = v;
    }
    if let Some(v) = string("SSOLED_DEVELOPER") {
        settings.developer = v;
    }
    if let Some(v) = string("SSOLED_LINES_EVENT") {
        settings.lines_event = v;
    }
    if let Some(v) = number("SSOLED_HEARTBEAT_INTERVAL_MS", HEARTBEAT_INTERVAL_RANGE) {
        settings.heartbeat_interval_ms = v;
    }
    if let Some(v) = string("SSOLED_DISCOVERY_PATH") {
        settings.discovery_path = v;
    }
    if let Some(v) = number("SSOLED_REQUEST_TIMEOUT_MS", REQUEST_TIMEOUT_RANGE) {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = boolean("SSOLED_ENFORCE_PLATFORM") {
        settings.enforce_platform = v;
    }
    if let Some(v) = string("SSOLED_LOG_LEVEL") {
        settings.log_level = v;
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
