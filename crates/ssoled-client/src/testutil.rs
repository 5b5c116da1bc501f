//! In-memory transport double shared by the unit tests.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use ssoled_core::{OledError, Result};

use crate::transport::Transport;

/// One recorded POST.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub endpoint: String,
    pub payload: Value,
}

/// Records every POST and answers 200 unless told otherwise.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    rejected: Mutex<HashSet<String>>,
    unreachable: Mutex<HashSet<String>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer non-200 for `endpoint` from now on.
    pub fn reject(&self, endpoint: &str) {
        let _ = self.rejected.lock().insert(endpoint.to_string());
    }

    /// Fail `endpoint` with a network error from now on.
    pub fn unreachable(&self, endpoint: &str) {
        let _ = self.unreachable.lock().insert(endpoint.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    /// Frames sent to `/game_event`, oldest first.
    pub fn frames(&self) -> Vec<[String; 3]> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.endpoint == "/game_event")
            .map(|c| {
                let frame = &c.payload["data"]["frame"];
                ["custom-text-1", "custom-text-2", "custom-text-3"]
                    .map(|key| frame[key].as_str().unwrap_or_default().to_string())
            })
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn address(&self) -> &str {
        "http://recording.invalid"
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<bool> {
        self.calls.lock().push(RecordedCall {
            endpoint: endpoint.to_string(),
            payload: payload.clone(),
        });
        if self.unreachable.lock().contains(endpoint) {
            return Err(OledError::Network {
                endpoint: endpoint.to_string(),
                message: "unreachable".to_string(),
            });
        }
        Ok(!self.rejected.lock().contains(endpoint))
    }
}
