//! The application-facing display handle.
//!
//! [`Oled`] owns the rolling [`DisplayBuffer`] and at most one [`Session`].
//! Both live behind a single async mutex, so session transitions and
//! buffer-mutation-plus-flush are serialized; the heartbeat task never takes
//! this lock.

use std::fmt::Display;
use std::sync::Arc;

use ssoled_core::{DisplayBuffer, OledError, ROWS, Result};
use ssoled_settings::OledSettings;
use tokio::sync::Mutex;
use tracing::debug;

use crate::session::{Registrar, Session};
use crate::transport::{HttpTransport, Transport};

#[derive(Default)]
struct State {
    session: Option<Session>,
    buffer: DisplayBuffer,
}

/// Three-line OLED display on a GameSense server.
pub struct Oled {
    registrar: Registrar,
    state: Mutex<State>,
}

impl Oled {
    /// Create a disconnected display with an empty buffer.
    pub fn new(settings: OledSettings) -> Self {
        Self {
            registrar: Registrar::new(settings),
            state: Mutex::new(State::default()),
        }
    }

    /// Settings used to connect.
    pub fn settings(&self) -> &OledSettings {
        self.registrar.settings()
    }

    /// Discover the server, register, bind the display event and start the
    /// heartbeat.
    pub async fn connect(&self) -> Result<()> {
        let timeout = self.settings().request_timeout();
        self.connect_with(move |address| {
            Arc::new(HttpTransport::new(address, timeout)) as Arc<dyn Transport>
        })
        .await
    }

    /// [`connect`](Self::connect) through a custom transport.
    pub async fn connect_with<F>(&self, make_transport: F) -> Result<()>
    where
        F: FnOnce(String) -> Arc<dyn Transport> + Send,
    {
        let mut state = self.state.lock().await;
        if state.session.is_some() {
            return Err(OledError::AlreadyConnected);
        }
        state.session = Some(self.registrar.connect_with(make_transport).await?);
        Ok(())
    }

    /// Stop the heartbeat (waiting for it to exit) and drop the session.
    ///
    /// The buffer keeps its contents.
    pub async fn disconnect(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let session = state.session.take().ok_or(OledError::NotConnected)?;
        let _ = session.close(true).await;
        Ok(())
    }

    /// Whether a session is active.
    pub async fn is_connected(&self) -> bool {
        self.state
            .lock()
            .await
            .session
            .as_ref()
            .is_some_and(Session::is_active)
    }

    /// Keepalives issued by the current session, if any.
    pub async fn keepalive_count(&self) -> Option<u64> {
        self.state
            .lock()
            .await
            .session
            .as_ref()
            .map(|s| s.heartbeat().keepalive_count())
    }

    /// Snapshot of the display rows, top first.
    pub async fn lines(&self) -> [String; ROWS] {
        self.state.lock().await.buffer.lines().clone()
    }

    /// Append `value` as the bottom line, scrolling the oldest line off.
    pub async fn print_text(&self, value: impl Display) -> Result<bool> {
        let text = value.to_string();
        self.update(move |buffer| {
            buffer.push(text);
            Ok(())
        })
        .await
    }

    /// Replace one row (0 is the top) in place.
    pub async fn set_text(&self, row: usize, value: impl Display) -> Result<bool> {
        let text = value.to_string();
        self.update(move |buffer| buffer.set(row, text)).await
    }

    /// Blank all rows.
    pub async fn clear(&self) -> Result<bool> {
        self.update(|buffer| {
            buffer.clear();
            Ok(())
        })
        .await
    }

    /// Mutate the buffer and flush it, all under the state lock.
    ///
    /// The session check comes first so a disconnected call leaves the
    /// buffer untouched.
    async fn update(&self, mutate: impl FnOnce(&mut DisplayBuffer) -> Result<()>) -> Result<bool> {
        let mut guard = self.state.lock().await;
        let State { session, buffer } = &mut *guard;
        let session = session.as_ref().ok_or(OledError::NotConnected)?;

        mutate(buffer)?;
        debug!(lines = ?buffer.lines(), recent = buffer.recent(), "display updated");
        session.flush(buffer).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
