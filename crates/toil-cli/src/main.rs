use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use toil_core::{DayRecord, Session};
use tracing_subscriber::EnvFilter;

use toil_cli::commands::{balance, clear, day, export, import, month, status};
use toil_cli::{Cli, Commands, Config, state};

/// Load config and the session state it points at.
///
/// Commands that replace the whole state start from an empty session when the
/// state file can't be loaded.
fn open_session(config_path: Option<&Path>, command: &Commands) -> Result<(Session, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let session = match state::load_session(&config.state_path) {
        Ok(session) => session,
        Err(err) if replaces_state(command) => {
            tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable state file");
            Session::new()
        }
        Err(err) => return Err(err).context("failed to load session"),
    };
    Ok((session, config))
}

const fn replaces_state(command: &Commands) -> bool {
    matches!(command, Commands::Import { .. } | Commands::Clear { yes: true })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut session, config) = open_session(cli.config.as_deref(), command)?;
    let mut stdout = io::stdout().lock();

    let changed = match command {
        Commands::Status => {
            status::run(&mut stdout, &session, &config)?;
            false
        }
        Commands::Get { date } => {
            day::get(&mut stdout, &session, date)?;
            false
        }
        Commands::Set {
            date,
            worked,
            national,
            day_off,
            toil_day,
        } => {
            let record = DayRecord {
                worked: *worked,
                national: *national,
                day_off: *day_off || *toil_day,
                toil_day: *toil_day,
            };
            day::set(&mut stdout, &mut session, date, record)?;
            true
        }
        Commands::Month { month: period, json } => {
            month::run(&mut stdout, &session, period, *json)?;
            false
        }
        Commands::Balance(args) => balance::run(&mut stdout, &mut session, args)?,
        Commands::Clear { yes } => clear::run(&mut stdout, &mut session, *yes)?,
        Commands::Export { output } => {
            match output {
                Some(path) => {
                    export::to_file(path, &session)?;
                    eprintln!("Exported {} day record(s) to {}.", session.store().len(), path.display());
                }
                None => export::run(&mut stdout, &session)?,
            }
            false
        }
        Commands::Import { path } => {
            let count = match path {
                Some(path) => import::from_file(path, &mut session)?,
                None => import::run(io::stdin().lock(), &mut session)?,
            };
            eprintln!("Imported {count} day record(s).");
            true
        }
    };
    stdout.flush()?;

    if changed {
        state::save_session(&config.state_path, &session)
            .with_context(|| format!("failed to save {}", config.state_path.display()))?;
    }

    Ok(())
}
