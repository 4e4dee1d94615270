//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its
//! output accordingly: sectioned text for humans, stable JSON for
//! scripts and frontends.

use std::io::{self, Write};

use serde::Serialize;

/// Shared width for human separators.
pub const RULE_WIDTH: usize = 60;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per result, or a JSON array).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Write a horizontal separator used by human output.
///
/// # Errors
///
/// Propagates writer errors.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
///
/// # Errors
///
/// Propagates writer errors.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render a left-aligned key/value line in human output.
///
/// # Errors
///
/// Propagates writer errors.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// Render `value` to stdout: JSON in [`OutputMode::Json`], otherwise the
/// supplied human closure.
///
/// # Errors
///
/// Propagates serialization and writer errors.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, value)?;
        writeln!(w)?;
    } else {
        human(value, &mut w)?;
    }
    Ok(())
}
