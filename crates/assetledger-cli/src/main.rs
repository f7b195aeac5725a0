mod cli;
mod commands;
mod config;
mod logging;
mod state;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::AssetLedgerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let state_dir = cli
        .state_dir
        .clone()
        .unwrap_or_else(AssetLedgerConfig::default_state_dir);
    let config = AssetLedgerConfig::load(&state_dir)?;
    logging::init_logging(&config);

    match cli.command {
        Commands::Config { action } => commands::config::handle(action, &state_dir).await,
        Commands::Asset(command) => {
            let mode = cli.mode.unwrap_or(config.comparison_mode);
            let state = AppState::open(&state_dir, mode).await?;
            commands::asset::handle(command, &state).await
        }
    }
}
