//! Session state on disk.
//!
//! The session lives in a single snapshot file (the same JSON document that
//! `toil export` prints). Writes go to a temp file first and are renamed into
//! place, so an interrupted save never leaves a half-written state file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use toil_core::{Session, Snapshot};

/// Loads the session from `path`.
///
/// Returns an empty session if the file doesn't exist.
/// Returns an error if the file exists but is unreadable or malformed.
pub fn load_session(path: &Path) -> Result<Session> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let snapshot = Snapshot::from_json_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            tracing::debug!(
                path = %path.display(),
                records = snapshot.store.len(),
                "loaded session state"
            );
            Ok(Session::from_snapshot(snapshot))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no state file, starting empty");
            Ok(Session::new())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Writes the session to `path`, replacing it atomically.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    let content = session
        .snapshot()
        .to_json_string()
        .context("failed to serialize session")?;
    write_atomic(path, &content)?;
    tracing::debug!(path = %path.display(), records = session.store().len(), "saved session state");
    Ok(())
}

/// Writes `content` through a temp file renamed over `path`.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        // Clean up temp file
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("failed to replace {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use toil_core::DayRecord;

    #[test]
    fn test_load_missing_returns_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let session = load_session(&path).unwrap();

        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut session = Session::new();
        session.set(2024, 2, 29, DayRecord::WORKED).unwrap();
        session.set_manual_balance(7);

        save_session(&path, &session).unwrap();
        let loaded = load_session(&path).unwrap();

        assert_eq!(loaded, session);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"2024": {"2": {"30": {}}}}"#).unwrap();

        let err = load_session(&path).unwrap_err();

        assert!(err.to_string().contains("failed to parse"));
    }
}
