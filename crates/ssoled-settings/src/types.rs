//! Settings schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where SteelSeries Engine 3 publishes its listen address on Windows.
pub const DEFAULT_DISCOVERY_PATH: &str =
    "%PROGRAMDATA%/SteelSeries/SteelSeries Engine 3/coreProps.json";

/// All ssoled settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OledSettings {
    /// Game identifier registered with GameSense.
    pub game: String,
    /// Name shown in SteelSeries Engine.
    pub display_name: String,
    /// Developer shown in SteelSeries Engine.
    pub developer: String,
    /// Event name bound to the three text lines.
    pub lines_event: String,
    /// Interval between keepalive requests in milliseconds.
    pub heartbeat_interval_ms: u64,
    /// Discovery file path; `%VAR%`, `$VAR` and `${VAR}` are expanded.
    pub discovery_path: String,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Refuse to connect on anything but Windows.
    pub enforce_platform: bool,
    /// Default log filter for the `tracing` subscriber.
    pub log_level: String,
}

impl Default for OledSettings {
    fn default() -> Self {
        Self {
            game: "SSOLED".to_string(),
            display_name: "ssoled".to_string(),
            developer: "ssoled".to_string(),
            lines_event: "LINES".to_string(),
            heartbeat_interval_ms: 10_000,
            discovery_path: DEFAULT_DISCOVERY_PATH.to_string(),
            request_timeout_ms: 5_000,
            enforce_platform: true,
            log_level: "warn".to_string(),
        }
    }
}

impl OledSettings {
    /// Game identifier as GameSense expects it (upper-case).
    pub fn game_id(&self) -> String {
        self.game.to_uppercase()
    }

    /// Event name as GameSense expects it (upper-case).
    pub fn event_id(&self) -> String {
        self.lines_event.to_uppercase()
    }

    /// Keepalive interval.
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
