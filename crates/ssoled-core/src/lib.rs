//! # ssoled-core
//!
//! Shared vocabulary for the ssoled crates:
//!
//! - **Errors**: [`OledError`] covering startup, precondition, and transport failures
//! - **Wire types**: GameSense request bodies and endpoint paths in [`wire`]
//! - **Display buffer**: the fixed three-line rolling [`DisplayBuffer`]
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stderr subscriber

#![deny(unsafe_code)]

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod wire;

pub use buffer::{DisplayBuffer, ROWS};
pub use errors::{OledError, Result};
