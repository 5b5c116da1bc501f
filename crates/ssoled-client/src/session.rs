//! Session establishment and the active-session aggregate.
//!
//! [`Registrar::connect`] runs the startup sequence: platform check,
//! discovery, game registration, event binding, heartbeat start. Any failing
//! step aborts with a startup [`OledError`] and leaves nothing running.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ssoled_core::constants::REQUIRED_OS;
use ssoled_core::wire::BindGameEvent;
use ssoled_core::{DisplayBuffer, OledError, Result};
use ssoled_settings::OledSettings;
use tracing::{debug, info};

use crate::client::GameSenseClient;
use crate::discovery::discover;
use crate::heartbeat::Heartbeat;
use crate::transport::{HttpTransport, Transport};

/// Builds [`Session`]s from settings.
#[derive(Clone, Debug)]
pub struct Registrar {
    settings: OledSettings,
}

impl Registrar {
    /// Create a registrar for the given settings.
    pub fn new(settings: OledSettings) -> Self {
        Self { settings }
    }

    /// Settings this registrar connects with.
    pub fn settings(&self) -> &OledSettings {
        &self.settings
    }

    /// Discover the server and register over HTTP.
    pub async fn connect(&self) -> Result<Session> {
        let timeout = self.settings.request_timeout();
        self.connect_with(move |address| {
            Arc::new(HttpTransport::new(address, timeout)) as Arc<dyn Transport>
        })
        .await
    }

    /// Discover the server and register through the transport built by
    /// `make_transport` from the discovered base address.
    ///
    /// `make_transport` is only called once discovery has succeeded.
    pub async fn connect_with<F>(&self, make_transport: F) -> Result<Session>
    where
        F: FnOnce(String) -> Arc<dyn Transport> + Send,
    {
        let settings = &self.settings;
        check_platform(settings.enforce_platform, std::env::consts::OS)?;

        let discovery = discover(&settings.discovery_path)?;
        let base_address = discovery.base_address();
        let client = GameSenseClient::new(make_transport(base_address.clone()), settings.game_id());

        if !client
            .register_game(&settings.display_name, &settings.developer)
            .await?
        {
            return Err(OledError::Registration);
        }
        debug!(game = client.game(), "game registered");

        let event = settings.event_id();
        let binding = BindGameEvent::text_lines(client.game(), event.clone());
        if !client.bind_event(&binding).await? {
            return Err(OledError::Bind { event });
        }
        debug!(%event, "display event bound");

        let heartbeat = Heartbeat::new(client.clone(), settings.heartbeat_interval());
        let _ = heartbeat.start();

        info!(address = %base_address, game = client.game(), "connected to GameSense");
        Ok(Session {
            base_address,
            client,
            heartbeat,
            event,
            active: AtomicBool::new(true),
        })
    }
}

/// Fail unless `os` is the platform GameSense runs on (when enforced).
pub fn check_platform(enforce: bool, os: &str) -> Result<()> {
    if enforce && !os.eq_ignore_ascii_case(REQUIRED_OS) {
        return Err(OledError::UnsupportedPlatform { os: os.to_string() });
    }
    Ok(())
}

/// A registered game with a running keepalive.
pub struct Session {
    base_address: String,
    client: GameSenseClient,
    heartbeat: Heartbeat,
    event: String,
    active: AtomicBool,
}

impl Session {
    /// Discovered server origin.
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Event the display lines are sent under.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Whether the session is still usable.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// The session's keepalive task.
    pub fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    /// Send all rows of `buffer` as one frame.
    pub async fn flush(&self, buffer: &DisplayBuffer) -> Result<bool> {
        if !self.is_active() {
            return Err(OledError::NotConnected);
        }
        self.client.send_frame(&self.event, buffer.frame()).await
    }

    /// Deactivate the session and stop its heartbeat.
    ///
    /// See [`Heartbeat::stop`] for the meaning of `block`.
    pub async fn close(self, block: bool) -> bool {
        self.active.store(false, Ordering::Release);
        let stopped = self.heartbeat.stop(block).await;
        info!(address = %self.base_address, "disconnected from GameSense");
        stopped
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
