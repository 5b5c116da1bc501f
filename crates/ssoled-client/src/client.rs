//! Typed GameSense endpoints on top of a [`Transport`].

use std::sync::Arc;

use serde::Serialize;
use ssoled_core::wire::{
    BindGameEvent, EventData, Frame, GameEvent, GameHeartbeat, GameMetadata, endpoints,
};
use ssoled_core::Result;

use crate::transport::Transport;

/// GameSense client for one game identifier.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct GameSenseClient {
    transport: Arc<dyn Transport>,
    game: String,
}

impl GameSenseClient {
    /// Wrap `transport` for the given (already upper-cased) game identifier.
    pub fn new(transport: Arc<dyn Transport>, game: impl Into<String>) -> Self {
        Self {
            transport,
            game: game.into(),
        }
    }

    /// Game identifier sent with every request.
    pub fn game(&self) -> &str {
        &self.game
    }

    /// Base address of the underlying transport.
    pub fn address(&self) -> &str {
        self.transport.address()
    }

    /// `POST /game_metadata`.
    pub async fn register_game(&self, display_name: &str, developer: &str) -> Result<bool> {
        let body = GameMetadata {
            game: self.game.clone(),
            game_display_name: display_name.to_string(),
            developer: developer.to_string(),
        };
        self.post(endpoints::GAME_METADATA, &body).await
    }

    /// `POST /bind_game_event`.
    pub async fn bind_event(&self, binding: &BindGameEvent) -> Result<bool> {
        self.post(endpoints::BIND_GAME_EVENT, binding).await
    }

    /// `POST /game_event` carrying a display frame.
    pub async fn send_frame(&self, event: &str, frame: Frame) -> Result<bool> {
        let body = GameEvent {
            game: self.game.clone(),
            event: event.to_string(),
            data: EventData { frame },
        };
        self.post(endpoints::GAME_EVENT, &body).await
    }

    /// `POST /game_heartbeat`.
    pub async fn heartbeat(&self) -> Result<bool> {
        let body = GameHeartbeat {
            game: self.game.clone(),
        };
        self.post(endpoints::GAME_HEARTBEAT, &body).await
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> Result<bool> {
        let payload = serde_json::to_value(body)?;
        self.transport.post(endpoint, &payload).await
    }
}
