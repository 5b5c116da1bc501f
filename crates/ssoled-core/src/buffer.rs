//! Fixed three-line rolling display buffer.
//!
//! Row 0 is the oldest line and the top of the screen. `push` rolls every
//! line up by one and writes the new value into the last row; the buffer
//! never grows or shrinks.

use crate::errors::{OledError, Result};
use crate::wire::Frame;

/// Number of text rows on the display.
pub const ROWS: usize = 3;

/// Current text of every display row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    lines: [String; ROWS],
}

impl DisplayBuffer {
    /// All-empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the bottom, discarding the oldest (row 0).
    pub fn push(&mut self, value: impl Into<String>) {
        self.lines.rotate_left(1);
        self.lines[ROWS - 1] = value.into();
    }

    /// Replace one row in place.
    pub fn set(&mut self, row: usize, value: impl Into<String>) -> Result<()> {
        let slot = self
            .lines
            .get_mut(row)
            .ok_or(OledError::InvalidRow { row, rows: ROWS })?;
        *slot = value.into();
        Ok(())
    }

    /// Reset every row to the empty string.
    pub fn clear(&mut self) {
        self.lines = Default::default();
    }

    /// Rows in display order.
    pub fn lines(&self) -> &[String; ROWS] {
        &self.lines
    }

    /// The most recently pushed line (last row).
    pub fn recent(&self) -> &str {
        &self.lines[ROWS - 1]
    }

    /// Snapshot of the rows as an event frame.
    pub fn frame(&self) -> Frame {
        Frame::from(&self.lines)
    }
}
