//! Scripted walkthrough of the display operations.

use std::time::Duration;

use anyhow::Result;
use ssoled_client::Oled;
use tokio::time::sleep;

use crate::report;

/// Seconds counted down on the top row before clearing.
const COUNTDOWN: u32 = 3;

/// Options for [`run`].
#[derive(Clone, Debug)]
pub struct DemoOptions {
    /// Text scrolled across the top row.
    pub text: String,
    /// Width of the marquee in characters.
    pub columns: usize,
    /// Delay between marquee frames.
    pub step: Duration,
}

/// Frames of `text` sliding in from the left edge and out to the right
/// across `columns` characters.
///
/// Frame `n` (1-based) shows the last `n` characters of `text` until it is
/// fully visible, then pads the left with `n - len` spaces. The final frame
/// carries `columns` spaces of padding.
pub fn marquee_frames(text: &str, columns: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    (1..=len + columns)
        .map(|n| {
            let pad = n.saturating_sub(len);
            let shown = n.min(len);
            let mut frame = " ".repeat(pad);
            frame.extend(&chars[len - shown..]);
            frame
        })
        .collect()
}

/// Print three lines, count down, clear, then run the marquee on row 0.
pub async fn run(oled: &Oled, options: &DemoOptions) -> Result<()> {
    for (line, pause) in [("Test", 1), ("abc", 1), ("n", 2)] {
        report(oled.print_text(line).await?);
        sleep(Duration::from_secs(pause)).await;
    }

    for remaining in (1..=COUNTDOWN).rev() {
        report(oled.set_text(0, format!("Clearing in {remaining}...")).await?);
        sleep(Duration::from_secs(1)).await;
    }

    report(oled.clear().await?);
    sleep(Duration::from_secs(2)).await;

    for frame in marquee_frames(&options.text, options.columns) {
        report(oled.set_text(0, frame).await?);
        sleep(options.step).await;
    }
    Ok(())
}
