use anyhow::Result;

use assetledger_store::TxContext;
use assetledger_types::SEED_ASSET_ID;

use crate::cli::AssetCommand;
use crate::state::AppState;

pub async fn handle(command: AssetCommand, state: &AppState) -> Result<()> {
    let output = execute(command, state).await?;
    println!("{output}");
    Ok(())
}

/// Run one contract operation in a fresh transaction and render its result.
pub async fn execute(command: AssetCommand, state: &AppState) -> Result<String> {
    let ctx = TxContext::new(&state.world_state);
    let contract = &state.contract;
    tracing::debug!(tx_id = %ctx.tx_id(), ?command, "Running command");

    let output = match command {
        AssetCommand::Init => {
            contract.init_ledger(&ctx).await?;
            format!("Seeded asset: {SEED_ASSET_ID}")
        }

        AssetCommand::Exists { id } => contract.asset_exists(&ctx, &id).await?.to_string(),

        AssetCommand::Create {
            id,
            availability,
            wallet,
            latency,
        } => {
            contract
                .create_asset(&ctx, &id, availability, wallet, latency)
                .await?;
            format!("Created asset: {id}")
        }

        AssetCommand::Read { id } => {
            let asset = contract.read_asset(&ctx, &id).await?;
            let encoded = String::from_utf8(asset.to_bytes()?)?;
            format!("{encoded}\nsha256: {}", asset.digest()?)
        }

        AssetCommand::Update {
            id,
            availability,
            wallet,
            latency,
        } => {
            contract
                .update_asset(&ctx, &id, availability, wallet, latency)
                .await?;
            format!("Updated asset: {id}")
        }

        AssetCommand::Delete { id } => {
            contract.delete_asset(&ctx, &id).await?;
            format!("Deleted asset: {id}")
        }

        AssetCommand::Compare => {
            let outcome = contract.compare_and_decide(&ctx).await?;
            serde_json::to_string_pretty(&outcome)?
        }

        AssetCommand::TransferRefund { id, new_wallet } => {
            let old_wallet = contract.transfer_refund(&ctx, &id, new_wallet).await?;
            old_wallet.to_string()
        }
    };
    Ok(output)
}
