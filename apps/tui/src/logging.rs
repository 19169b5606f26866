use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber.
///
/// Headless runs log to stderr. The interactive UI owns the terminal, so it
/// logs only when a file is given.
pub fn init(debug: bool, headless: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if debug {
        "senate_trades_tui=debug,senate_trades_core=debug"
    } else {
        "senate_trades_tui=info,senate_trades_core=info"
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    match (log_file, headless) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init()?;
        }
        (None, true) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()?;
        }
        (None, false) => {}
    }
    Ok(())
}
