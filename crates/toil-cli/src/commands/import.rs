//! Import command for replacing the session from a snapshot document.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use toil_core::Session;

/// Reads a snapshot document and replaces the session with it.
///
/// The session is only touched once the whole document is valid.
/// Returns the number of imported day records.
pub fn run<R: Read>(mut reader: R, session: &mut Session) -> Result<usize> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("failed to read snapshot")?;
    apply(&content, session)
}

/// Imports a snapshot file.
pub fn from_file(path: &Path, session: &mut Session) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    apply(&content, session)
}

fn apply(content: &str, session: &mut Session) -> Result<usize> {
    let document: Value = serde_json::from_str(content).context("snapshot is not valid JSON")?;
    session
        .import(&document)
        .context("snapshot rejected, nothing was imported")?;
    Ok(session.store().len())
}
