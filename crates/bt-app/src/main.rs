//! BT Browser terminal entry point.
//!
//! Starts in the account chooser. `login` opens a browser window bound to
//! that account; `logout` returns to the chooser. `quit` or end of input
//! exits.

mod config;
mod repl;

use anyhow::{Context, Result};

use bt_profile::ProfileStore;
use bt_vfs::RealVfs;
use config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    let vfs = RealVfs::new(config.data_dir.clone());
    log::info!(
        "Starting {} (data in {})",
        config.window_title,
        vfs.root().display()
    );
    let store = ProfileStore::new(Box::new(vfs), &config.accounts_dir);
    log::debug!("Accounts stored in {}", store.dir());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::run(&config, store, stdin.lock(), &mut stdout)?;

    log::info!("Shutting down");
    Ok(())
}
