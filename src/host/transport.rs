// ============================================================================
// src/host/transport.rs – Request transport seam
// ============================================================================

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::host::model::OperationModel;

/// Sends one operation request and returns the parsed response document.
pub trait Transport {
    fn send(&self, operation: &OperationModel, params: &Map<String, Value>) -> Result<Value>;
}

/// Answers each operation from `<dir>/<OperationName>.json`.
///
/// Used for offline runs and recorded sessions; request signing and HTTP are
/// not part of this tool.
#[derive(Debug, Clone)]
pub struct ReplayTransport {
    dir: Option<PathBuf>,
}

impl ReplayTransport {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl Transport for ReplayTransport {
    fn send(&self, operation: &OperationModel, params: &Map<String, Value>) -> Result<Value> {
        let dir = self.dir.as_ref().ok_or_else(|| {
            anyhow!("no transport configured; set transport.replay_dir in the config file")
        })?;
        let request = Value::Object(params.clone());
        debug!(operation = %operation.name, params = %request, "send");

        let path = dir.join(format!("{}.json", operation.name));
        let body = fs::read_to_string(&path)
            .with_context(|| format!("read recorded response {}", path.display()))?;
        let parsed: Value = serde_json::from_str(&body)
            .with_context(|| format!("parse recorded response {}", path.display()))?;
        if !parsed.is_object() {
            bail!("recorded response {} is not a JSON object", path.display());
        }
        Ok(parsed)
    }
}
