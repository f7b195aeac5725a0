use anyhow::Result;
use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::AssetLedgerConfig;

pub async fn handle(action: ConfigAction, state_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = AssetLedgerConfig::config_path(state_dir);
            if path.exists() {
                println!("Config already exists at: {}", path.display());
                println!("Use `assetledger config show` to view it.");
                return Ok(());
            }

            let config = AssetLedgerConfig::default();
            config.save(state_dir)?;
            println!("Created default config at: {}", path.display());
            println!();
            print_config(&config);
        }

        ConfigAction::Show => {
            let config = AssetLedgerConfig::load(state_dir)?;
            print_config(&config);
        }
    }
    Ok(())
}

fn print_config(config: &AssetLedgerConfig) {
    println!("Configuration:");
    println!("  comparison_mode:  {}", config.comparison_mode);
    println!("  log_level:        {}", config.log_level);
    println!("  log_format:       {:?}", config.log_format);
}
