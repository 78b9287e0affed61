// ============================================================================
// src/ui.rs – Terminal output: JSON results on stdout, notices on stderr
// ============================================================================

use anyhow::{Context, Result};
use console::Style;
use serde_json::Value;
use std::io::{self, Write};

/// Output helpers. Colours are dropped automatically when a stream is not a
/// terminal.
pub struct UX {
    error: Style,
    warn: Style,
}

impl UX {
    pub fn new() -> Self {
        Self {
            error: Style::new().red().bold().for_stderr(),
            warn: Style::new().yellow().for_stderr(),
        }
    }

    pub fn error(&self, msg: &str) {
        eprintln!("\n{}\n", self.error.apply_to(msg));
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("{}", self.warn.apply_to(msg));
    }

    /// Pretty-printed JSON document followed by a newline.
    pub fn document(&self, value: &Value) -> Result<()> {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, value).context("write response")?;
        writeln!(out).context("write response")?;
        Ok(())
    }
}

impl Default for UX {
    fn default() -> Self {
        Self::new()
    }
}
