//! # ssoled-client
//!
//! Rolling three-line text display on a SteelSeries GameSense OLED.
//!
//! - [`Oled`]: the handle applications use (`connect`, `print_text`,
//!   `set_text`, `clear`, `disconnect`)
//! - [`Registrar`] / [`Session`]: discovery, registration, event binding
//! - [`Heartbeat`]: cancellable background keepalive
//! - [`Transport`] / [`HttpTransport`]: JSON-over-HTTP POSTs
//!
//! ```no_run
//! # async fn demo() -> ssoled_core::Result<()> {
//! let oled = ssoled_client::Oled::new(ssoled_settings::OledSettings::default());
//! oled.connect().await?;
//! oled.print_text("hello").await?;
//! oled.disconnect().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod discovery;
pub mod heartbeat;
pub mod oled;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::GameSenseClient;
pub use discovery::{Discovery, discover, expand_env_vars};
pub use heartbeat::Heartbeat;
pub use oled::Oled;
pub use session::{Registrar, Session, check_platform};
pub use transport::{HttpTransport, Transport};
