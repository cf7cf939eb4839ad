//! Status command for showing where the state lives and the balance.

use std::io::Write;

use anyhow::Result;
use toil_core::Session;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, session: &Session, config: &Config) -> Result<()> {
    let report = session.report();

    writeln!(writer, "TOIL ledger status")?;
    writeln!(writer, "State file: {}", config.state_path.display())?;

    if session.store().is_empty() {
        writeln!(writer, "No days recorded.")?;
    } else {
        writeln!(writer, "Recorded days: {}", session.store().len())?;
        writeln!(writer, "Recorded months: {}", report.months.len())?;
    }

    writeln!(
        writer,
        "Current TOIL balance: {} days",
        report.effective_balance()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use insta::assert_snapshot;
    use toil_core::DayRecord;

    #[test]
    fn test_status_command_outputs_counts_and_balance() {
        let mut session = Session::new();
        session.set(2024, 1, 2, DayRecord::WORKED).unwrap();
        session.set(2024, 1, 3, DayRecord::WORKED).unwrap();
        session.set(2024, 2, 5, DayRecord::TOIL_DAY).unwrap();
        let config = Config {
            state_path: PathBuf::from("/data/toil/state.json"),
        };
        let mut output = Vec::new();

        run(&mut output, &session, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        TOIL ledger status
        State file: /data/toil/state.json
        Recorded days: 3
        Recorded months: 2
        Current TOIL balance: -1 days
        ");
    }

    #[test]
    fn test_status_command_on_empty_session() {
        let config = Config {
            state_path: PathBuf::from("/data/toil/state.json"),
        };
        let mut output = Vec::new();

        run(&mut output, &Session::new(), &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No days recorded.\n"));
        assert!(output.ends_with("Current TOIL balance: 0 days\n"));
    }
}
