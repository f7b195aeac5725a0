use assetledger_store::TxContext;
use assetledger_types::{Asset, AssetError, Result};

use crate::compare::ComparisonMode;

/// Operations over asset records in world state.
///
/// Holds no state of its own beyond the comparison mode; every call reads
/// and writes through the transaction context it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetContract {
    mode: ComparisonMode,
}

impl AssetContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ComparisonMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    /// Seed world state, overwriting whatever is stored at the seed keys.
    pub async fn init_ledger(&self, ctx: &TxContext<'_>) -> Result<()> {
        let assets = [Asset::seed()];
        for asset in &assets {
            put_asset(ctx, asset).await?;
            tracing::info!(tx_id = %ctx.tx_id(), asset_id = %asset.id, "Seeded asset");
        }
        Ok(())
    }

    /// Whether a value is stored under `id`.
    pub async fn asset_exists(&self, ctx: &TxContext<'_>, id: &str) -> Result<bool> {
        let value = get_raw(ctx, id).await?;
        Ok(value.is_some())
    }

    /// Issue a new asset. Fails without writing if `id` is taken.
    pub async fn create_asset(
        &self,
        ctx: &TxContext<'_>,
        id: &str,
        availability: i64,
        wallet: i64,
        latency: i64,
    ) -> Result<()> {
        if self.asset_exists(ctx, id).await? {
            return Err(AssetError::AlreadyExists(id.to_string()));
        }

        let asset = Asset::new(id, availability, wallet, latency);
        put_asset(ctx, &asset).await?;
        tracing::info!(tx_id = %ctx.tx_id(), asset_id = %id, "Created asset");
        Ok(())
    }

    pub async fn read_asset(&self, ctx: &TxContext<'_>, id: &str) -> Result<Asset> {
        let bytes = get_raw(ctx, id)
            .await?
            .ok_or_else(|| AssetError::NotFound(id.to_string()))?;
        let asset = Asset::from_bytes(id, &bytes)?;
        tracing::debug!(tx_id = %ctx.tx_id(), asset_id = %id, "Read asset");
        Ok(asset)
    }

    /// Replace every field of an existing asset.
    pub async fn update_asset(
        &self,
        ctx: &TxContext<'_>,
        id: &str,
        availability: i64,
        wallet: i64,
        latency: i64,
    ) -> Result<()> {
        if !self.asset_exists(ctx, id).await? {
            return Err(AssetError::NotFound(id.to_string()));
        }

        let asset = Asset::new(id, availability, wallet, latency);
        put_asset(ctx, &asset).await?;
        tracing::info!(tx_id = %ctx.tx_id(), asset_id = %id, "Updated asset");
        Ok(())
    }

    pub async fn delete_asset(&self, ctx: &TxContext<'_>, id: &str) -> Result<()> {
        if !self.asset_exists(ctx, id).await? {
            return Err(AssetError::NotFound(id.to_string()));
        }

        ctx.state()
            .del_state(id)
            .await
            .map_err(|e| AssetError::store_unavailable(format!("delete {id}"), e))?;
        tracing::info!(tx_id = %ctx.tx_id(), asset_id = %id, "Deleted asset");
        Ok(())
    }
}

async fn get_raw(ctx: &TxContext<'_>, id: &str) -> Result<Option<Vec<u8>>> {
    ctx.state()
        .get_state(id)
        .await
        .map_err(|e| AssetError::store_unavailable(format!("get {id}"), e))
}

pub(crate) async fn put_asset(ctx: &TxContext<'_>, asset: &Asset) -> Result<()> {
    let bytes = asset.to_bytes()?;
    ctx.state()
        .put_state(&asset.id, bytes)
        .await
        .map_err(|e| AssetError::store_unavailable(format!("put {}", asset.id), e))
}
