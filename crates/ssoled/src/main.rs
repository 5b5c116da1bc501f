//! # ssoled
//!
//! Command-line driver: connect to the local GameSense server, update the
//! OLED display, disconnect.

#![deny(unsafe_code)]

mod demo;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ssoled_client::Oled;
use ssoled_settings::OledSettings;
use tracing::{debug, warn};

use crate::demo::DemoOptions;

/// Show text on a SteelSeries GameSense OLED screen.
#[derive(Parser, Debug)]
#[command(name = "ssoled", version, about = "Show text on a SteelSeries OLED screen")]
struct Cli {
    /// Path (or `%VAR%` template) of the server's `coreProps.json`.
    #[arg(long, global = true)]
    discovery_path: Option<String>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Skip the Windows-only platform check.
    #[arg(long, global = true)]
    no_platform_check: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append each argument as a new bottom line.
    Print {
        /// Lines to append, in order.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Replace one row (0 is the top).
    Set {
        /// Row index.
        row: usize,
        /// New row text.
        text: String,
    },
    /// Blank all rows.
    Clear,
    /// Print, count down, clear, then scroll a marquee.
    Demo {
        /// Marquee text.
        #[arg(long, default_value = "SAMPLE TEXT")]
        text: String,
        /// Marquee width in characters.
        #[arg(long, default_value_t = 16)]
        columns: usize,
        /// Milliseconds between marquee frames.
        #[arg(long, default_value_t = 200)]
        step_ms: u64,
    },
}

impl Cli {
    /// Overlay command-line flags on loaded settings.
    fn apply(&self, settings: &mut OledSettings) {
        if let Some(path) = &self.discovery_path {
            settings.discovery_path.clone_from(path);
        }
        if let Some(level) = &self.log_level {
            settings.log_level.clone_from(level);
        }
        if self.no_platform_check {
            settings.enforce_platform = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is configured from settings, so a bad settings file is only
    // reported once the subscriber exists.
    let loaded = ssoled_settings::load_settings();
    let mut settings = loaded.as_ref().cloned().unwrap_or_default();
    cli.apply(&mut settings);
    ssoled_core::logging::init_subscriber(&settings.log_level);
    if let Err(e) = &loaded {
        warn!(error = %e, "ignoring unreadable settings file");
    }
    debug!(?settings, "settings loaded");

    let oled = Oled::new(settings);
    oled.connect()
        .await
        .context("Failed to connect to GameSense")?;

    let outcome = run(&oled, cli.command).await;

    oled.disconnect()
        .await
        .context("Failed to disconnect from GameSense")?;
    outcome
}

async fn run(oled: &Oled, command: Command) -> Result<()> {
    match command {
        Command::Print { text } => {
            for line in text {
                report(oled.print_text(&line).await?);
            }
        }
        Command::Set { row, text } => {
            report(
                oled.set_text(row, &text)
                    .await
                    .with_context(|| format!("Failed to set row {row}"))?,
            );
        }
        Command::Clear => report(oled.clear().await?),
        Command::Demo {
            text,
            columns,
            step_ms,
        } => {
            let options = DemoOptions {
                text,
                columns,
                step: Duration::from_millis(step_ms),
            };
            demo::run(oled, &options).await?;
        }
    }
    Ok(())
}

fn report(accepted: bool) {
    if !accepted {
        warn!("display update rejected by server");
    }
}
