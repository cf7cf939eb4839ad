//! Clear command for wiping all recorded data.

use std::io::Write;

use anyhow::Result;
use toil_core::Session;

/// Runs the clear command. Returns true if the session changed.
pub fn run<W: Write>(writer: &mut W, session: &mut Session, confirmed: bool) -> Result<bool> {
    if !confirmed {
        writeln!(
            writer,
            "This deletes {} day record(s) and the balance adjustment. Re-run with --yes to confirm.",
            session.store().len()
        )?;
        return Ok(false);
    }

    session.clear_all();
    writeln!(writer, "All data cleared.")?;
    Ok(true)
}
