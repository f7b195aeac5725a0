use std::path::PathBuf;

use assetledger_contract::ComparisonMode;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "assetledger", about = "Asset records over a local world state")]
pub struct Cli {
    /// State directory (defaults to $ASSETLEDGER_STATE_DIR or ~/.assetledger)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Comparison mode override: legacy or strict
    #[arg(long, global = true)]
    pub mode: Option<ComparisonMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Asset(AssetCommand),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AssetCommand {
    /// Write the seed asset, overwriting any existing value
    Init,
    /// Check whether an asset exists
    Exists {
        /// Asset ID
        id: String,
    },
    /// Issue a new asset
    Create {
        /// Asset ID
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        availability: i64,
        #[arg(long, allow_negative_numbers = true)]
        wallet: i64,
        #[arg(long, allow_negative_numbers = true)]
        latency: i64,
    },
    /// Show an asset
    Read {
        /// Asset ID
        id: String,
    },
    /// Replace every field of an existing asset
    Update {
        /// Asset ID
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        availability: i64,
        #[arg(long, allow_negative_numbers = true)]
        wallet: i64,
        #[arg(long, allow_negative_numbers = true)]
        latency: i64,
    },
    /// Delete an asset
    Delete {
        /// Asset ID
        id: String,
    },
    /// Compare asset2's availability against asset1's
    Compare,
    /// Overwrite an asset's wallet and print the previous value
    TransferRefund {
        /// Asset ID
        id: String,
        /// New wallet value
        #[arg(long, allow_negative_numbers = true)]
        new_wallet: i64,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigAction {
    /// Write a default config file
    Init,
    /// Show the current config
    Show,
}
