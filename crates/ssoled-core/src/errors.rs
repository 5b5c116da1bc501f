//! Error taxonomy for ssoled.
//!
//! Three families share one enum:
//!
//! - **Startup** errors abort `connect` (wrong OS, no discovery file,
//!   registration or bind rejected). Nothing useful can proceed without a
//!   registered session, so callers usually terminate on these.
//! - **Precondition** errors are caller mistakes (no session, double connect,
//!   row out of range).
//! - **Transport** errors are network-level failures. A non-200 response is
//!   *not* an error; it is reported as `Ok(false)` by the transport.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ssoled client.
#[derive(Debug, Error)]
pub enum OledError {
    /// The GameSense server only publishes its discovery file on Windows.
    #[error("unsupported platform `{os}`: GameSense discovery is only available on Windows")]
    UnsupportedPlatform {
        /// The OS the process is running on.
        os: String,
    },

    /// The discovery file does not exist, which means the server is not running.
    #[error("SteelSeries Engine is not running (no discovery file at {})", path.display())]
    ServerNotRunning {
        /// Expanded discovery file path.
        path: PathBuf,
    },

    /// The discovery file exists but could not be read or parsed.
    #[error("invalid discovery file {}: {message}", path.display())]
    Discovery {
        /// Expanded discovery file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The server rejected game registration.
    #[error("game registration was rejected by the server")]
    Registration,

    /// The server rejected the event handler binding.
    #[error("binding event `{event}` was rejected by the server")]
    Bind {
        /// Event name that failed to bind.
        event: String,
    },

    /// A display operation was attempted without an active session.
    #[error("not connected to SteelSeries Engine; call connect() first")]
    NotConnected,

    /// `connect` was called while a session is already active.
    #[error("a session is already active; call disconnect() first")]
    AlreadyConnected,

    /// A row index outside the display buffer.
    #[error("row {row} is out of range (display has {rows} rows)")]
    InvalidRow {
        /// Requested row.
        row: usize,
        /// Number of rows in the display.
        rows: usize,
    },

    /// The request never produced an HTTP response.
    #[error("network error on {endpoint}: {message}")]
    Network {
        /// Endpoint path that was being called.
        endpoint: String,
        /// Underlying failure.
        message: String,
    },

    /// A request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl OledError {
    /// Whether this error can only happen while establishing a session.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. }
                | Self::ServerNotRunning { .. }
                | Self::Discovery { .. }
                | Self::Registration
                | Self::Bind { .. }
        )
    }

    /// Whether this error indicates a caller programming mistake.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotConnected | Self::AlreadyConnected | Self::InvalidRow { .. }
        )
    }
}

/// Result type for ssoled operations.
pub type Result<T> = std::result::Result<T, OledError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_not_running_mentions_path() {
        let err = OledError::ServerNotRunning {
            path: PathBuf::from("C:/ProgramData/SteelSeries/coreProps.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("not running"));
        assert!(msg.contains("coreProps.json"));
    }

    #[test]
    fn invalid_row_display() {
        let err = OledError::InvalidRow { row: 7, rows: 3 };
        assert_eq!(err.to_string(), "row 7 is out of range (display has 3 rows)");
    }

    #[test]
    fn network_display_includes_endpoint() {
        let err = OledError::Network {
            endpoint: "/game_heartbeat".into(),
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "network error on /game_heartbeat: connection refused"
        );
    }

    #[test]
    fn startup_classification() {
        assert!(OledError::Registration.is_startup());
        assert!(OledError::Bind { event: "LINES".into() }.is_startup());
        assert!(
            OledError::UnsupportedPlatform { os: "linux".into() }.is_startup()
        );
        assert!(!OledError::NotConnected.is_startup());
        assert!(
            !OledError::Network {
                endpoint: "/game_event".into(),
                message: "timeout".into(),
            }
            .is_startup()
        );
    }

    #[test]
    fn precondition_classification() {
        assert!(OledError::NotConnected.is_precondition());
        assert!(OledError::AlreadyConnected.is_precondition());
        assert!(OledError::InvalidRow { row: 3, rows: 3 }.is_precondition());
        assert!(!OledError::Registration.is_precondition());
    }

    #[test]
    fn encode_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err: OledError = json_err.into();
        assert!(matches!(err, OledError::Encode(_)));
    }
}
