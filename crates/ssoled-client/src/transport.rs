//! JSON-over-HTTP transport bound to one base address.
//!
//! A non-200 response is an expected outcome and comes back as `Ok(false)`
//! after being logged; only failures that never produce a response are
//! errors.

use std::backtrace::Backtrace;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use ssoled_core::{OledError, Result};
use tracing::{debug, error};

/// Posts JSON bodies to endpoints under a fixed base address.
///
/// Implementations must tolerate concurrent calls: the heartbeat task and
/// display flushes share one transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base address every endpoint is appended to (`http://host:port`).
    fn address(&self) -> &str;

    /// POST `payload` to `address + endpoint`.
    ///
    /// Returns `Ok(true)` iff the server answered 200.
    async fn post(&self, endpoint: &str, payload: &Value) -> Result<bool>;
}

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    address: String,
}

impl HttpTransport {
    /// Create a transport for `address` with the given request timeout.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("ssoled/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            address: address.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn address(&self) -> &str {
        &self.address
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<bool> {
        let url = format!("{}{endpoint}", self.address);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| OledError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            return Ok(true);
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            endpoint,
            status,
            body = %body,
            backtrace = %Backtrace::force_capture(),
            "request rejected by server"
        );
        Ok(false)
    }
}
