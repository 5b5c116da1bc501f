//! GameSense request bodies and endpoint paths.
//!
//! Field names follow the server's JSON exactly, which mixes `snake_case`
//! (`game_display_name`, `value_optional`) with kebab-case (`device-type`,
//! `has-text`, `custom-text-1`).

use serde::{Deserialize, Serialize};

use crate::buffer::ROWS;

/// Endpoint paths, relative to the discovered base address.
pub mod endpoints {
    /// Registers game metadata.
    pub const GAME_METADATA: &str = "/game_metadata";
    /// Binds an event to screen handlers.
    pub const BIND_GAME_EVENT: &str = "/bind_game_event";
    /// Sends an event value (a display frame for us).
    pub const GAME_EVENT: &str = "/game_event";
    /// Keeps the game registration alive.
    pub const GAME_HEARTBEAT: &str = "/game_heartbeat";
}

/// Context-frame key for a display row (`custom-text-1` for row 0).
pub fn frame_key(row: usize) -> String {
    format!("custom-text-{}", row + 1)
}

/// Body of `POST /game_metadata`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Game identifier (upper-case).
    pub game: String,
    /// Name shown in SteelSeries Engine.
    pub game_display_name: String,
    /// Developer shown in SteelSeries Engine.
    pub developer: String,
}

/// Body of `POST /bind_game_event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindGameEvent {
    /// Game identifier.
    pub game: String,
    /// Event name being bound.
    pub event: String,
    /// Lower bound of the event value.
    pub min_value: i64,
    /// Upper bound of the event value.
    pub max_value: i64,
    /// Icon shown next to the text.
    pub icon_id: u32,
    /// Screen handlers for this event.
    pub handlers: Vec<ScreenHandler>,
}

impl BindGameEvent {
    /// Binding for a text-only event that drives [`ROWS`] lines on the
    /// primary OLED zone, one line per `custom-text-N` frame key.
    pub fn text_lines(game: impl Into<String>, event: impl Into<String>) -> Self {
        let lines = (0..ROWS)
            .map(|row| LineSpec {
                has_text: true,
                context_frame_key: frame_key(row),
            })
            .collect();

        Self {
            game: game.into(),
            event: event.into(),
            min_value: 0,
            max_value: 100,
            icon_id: 1,
            handlers: vec![ScreenHandler {
                device_type: "screened".to_string(),
                zone: "one".to_string(),
                mode: "screen".to_string(),
                value_optional: true,
                datas: vec![ScreenData { lines }],
            }],
        }
    }
}

/// A screen handler inside a bind request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenHandler {
    /// Device class, `screened` for OLED devices.
    #[serde(rename = "device-type")]
    pub device_type: String,
    /// Display zone.
    pub zone: String,
    /// Handler mode.
    pub mode: String,
    /// Whether the event value may be omitted.
    pub value_optional: bool,
    /// Frame layouts.
    pub datas: Vec<ScreenData>,
}

/// One frame layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenData {
    /// Line slots, top to bottom.
    pub lines: Vec<LineSpec>,
}

/// One text line slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpec {
    /// The line renders text.
    #[serde(rename = "has-text")]
    pub has_text: bool,
    /// Key in the event frame the text is read from.
    #[serde(rename = "context-frame-key")]
    pub context_frame_key: String,
}

/// Body of `POST /game_event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Game identifier.
    pub game: String,
    /// Event name.
    pub event: String,
    /// Event payload.
    pub data: EventData,
}

/// Payload of a [`GameEvent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    /// Current display lines.
    pub frame: Frame,
}

/// The three display lines sent together in one event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Row 0.
    #[serde(rename = "custom-text-1")]
    pub line1: String,
    /// Row 1.
    #[serde(rename = "custom-text-2")]
    pub line2: String,
    /// Row 2.
    #[serde(rename = "custom-text-3")]
    pub line3: String,
}

impl From<&[String; ROWS]> for Frame {
    fn from(lines: &[String; ROWS]) -> Self {
        let [line1, line2, line3] = lines.clone();
        Self { line1, line2, line3 }
    }
}

/// Body of `POST /game_heartbeat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHeartbeat {
    /// Game identifier.
    pub game: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
