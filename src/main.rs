//! Canteen ordering counter

use std::io::{self, IsTerminal};

use anyhow::Result;
use canteen::{config::Config, observability, shell};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|error| error.exit());

    observability::init(&config.logging)?;

    let mut session = config.session()?;

    info!(
        items = session.catalog().len(),
        log_dir = %config.log_dir.display(),
        "menu loaded"
    );

    let stdout = io::stdout();
    let bold = stdout.is_terminal();

    shell::run(&mut session, io::stdin().lock(), stdout.lock(), bold)?;

    Ok(())
}
