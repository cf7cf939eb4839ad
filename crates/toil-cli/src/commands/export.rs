//! Export command for writing the snapshot document.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use toil_core::Session;

use crate::state::write_atomic;

/// Writes the snapshot document to `writer`.
pub fn run<W: Write>(writer: &mut W, session: &Session) -> Result<()> {
    let content = render(session)?;
    writeln!(writer, "{content}")?;
    Ok(())
}

/// Writes the snapshot document to a file.
pub fn to_file(path: &Path, session: &Session) -> Result<()> {
    let content = render(session)?;
    write_atomic(path, &content)?;
    tracing::debug!(path = %path.display(), records = session.store().len(), "exported snapshot");
    Ok(())
}

fn render(session: &Session) -> Result<String> {
    session
        .snapshot()
        .to_json_string()
        .context("failed to serialize snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use toil_core::DayRecord;

    #[test]
    fn test_export_writes_snapshot_document() {
        let mut session = Session::new();
        session.set(2025, 12, 24, DayRecord::DAY_OFF).unwrap();
        session.set(2025, 12, 25, DayRecord::NATIONAL).unwrap();
        session.set_manual_balance(3);
        let mut output = Vec::new();

        run(&mut output, &session).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r#"
        {
          "2025": {
            "12": {
              "24": {
                "day_off": true,
                "national": false,
                "toil_day": false,
                "worked": false
              },
              "25": {
                "day_off": false,
                "national": true,
                "toil_day": false,
                "worked": false
              }
            }
          },
          "_toil_balance": 3
        }
        "#);
    }

    #[test]
    fn test_export_to_file_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let mut session = Session::new();
        session.set(2025, 3, 3, DayRecord::WORKED).unwrap();

        to_file(&path, &session).unwrap();

        let loaded = crate::state::load_session(&path).unwrap();
        assert_eq!(loaded, session);
    }
}
