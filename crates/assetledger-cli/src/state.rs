use anyhow::{Context, Result};
use std::path::Path;

use assetledger_contract::{AssetContract, ComparisonMode};
use assetledger_store::FileWorldState;

/// Shared application state for CLI commands.
pub struct AppState {
    pub world_state: FileWorldState,
    pub contract: AssetContract,
}

impl AppState {
    pub async fn open(state_dir: &Path, mode: ComparisonMode) -> Result<Self> {
        let world_state = FileWorldState::open(state_dir)
            .await
            .context("Failed to open world state")?;
        Ok(Self {
            world_state,
            contract: AssetContract::with_mode(mode),
        })
    }
}
