use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use assetledger_store::TxContext;
use assetledger_types::Result;

use crate::contract::{AssetContract, put_asset};

/// Asset whose availability is the reference side of the comparison.
pub const REFERENCE_ASSET_ID: &str = "asset1";

/// Asset compared against the reference.
pub const CANDIDATE_ASSET_ID: &str = "asset2";

/// Which comparison [`AssetContract::compare_and_decide`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Behaviour of the deployed contract: the candidate is read but its value
    /// and error are dropped, and the reference is compared with itself, so
    /// no transfer is ever signalled.
    #[default]
    Legacy,
    /// Compare the candidate's availability against the reference and
    /// propagate a failed candidate read.
    Strict,
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown comparison mode '{other}' (expected legacy or strict)")),
        }
    }
}

/// What the comparison decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferSignal {
    NoAction,
    TransferRefund,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub mode: ComparisonMode,
    pub reference_availability: i64,
    pub compared_availability: i64,
    pub signal: TransferSignal,
}

impl ComparisonOutcome {
    pub fn should_transfer(&self) -> bool {
        self.signal == TransferSignal::TransferRefund
    }
}

impl AssetContract {
    /// Compare the candidate asset's availability with the reference asset's
    /// and signal a refund when the candidate falls below it. Never writes.
    pub async fn compare_and_decide(&self, ctx: &TxContext<'_>) -> Result<ComparisonOutcome> {
        let reference = self.read_asset(ctx, REFERENCE_ASSET_ID).await?;
        let reference_availability = reference.availability;

        let compared_availability = match self.mode() {
            ComparisonMode::Legacy => {
                // TODO: switch the default to Strict once the deployed contract
                // is upgraded; until then this must keep comparing asset1 with itself.
                if let Err(e) = self.read_asset(ctx, CANDIDATE_ASSET_ID).await {
                    tracing::warn!(
                        tx_id = %ctx.tx_id(),
                        asset_id = CANDIDATE_ASSET_ID,
                        error = %e,
                        "Ignoring candidate read failure in legacy comparison"
                    );
                }
                reference_availability
            }
            ComparisonMode::Strict => {
                self.read_asset(ctx, CANDIDATE_ASSET_ID)
                    .await?
                    .availability
            }
        };

        let signal = if compared_availability < reference_availability {
            TransferSignal::TransferRefund
        } else {
            TransferSignal::NoAction
        };
        tracing::info!(
            tx_id = %ctx.tx_id(),
            mode = %self.mode(),
            reference_availability,
            compared_availability,
            ?signal,
            "Comparison decided"
        );

        Ok(ComparisonOutcome {
            mode: self.mode(),
            reference_availability,
            compared_availability,
            signal,
        })
    }

    /// Overwrite the wallet of `id` and return the value it replaced.
    ///
    /// This is a plain overwrite; callers compute `new_wallet` themselves.
    pub async fn transfer_refund(
        &self,
        ctx: &TxContext<'_>,
        id: &str,
        new_wallet: i64,
    ) -> Result<i64> {
        let mut asset = self.read_asset(ctx, id).await?;

        let old_wallet = asset.wallet;
        asset.wallet = new_wallet;
        put_asset(ctx, &asset).await?;

        tracing::info!(
            tx_id = %ctx.tx_id(),
            asset_id = %id,
            old_wallet,
            new_wallet,
            "Wallet refunded"
        );
        Ok(old_wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::FlakyState;
    use assetledger_store::{InMemoryWorldState, WorldState};
    use assetledger_types::{Asset, AssetError};
    use proptest::prelude::*;

    async fn seeded(candidate_availability: Option<i64>) -> InMemoryWorldState {
        let store = InMemoryWorldState::new();
        let ctx = TxContext::new(&store);
        let contract = AssetContract::new();
        contract.init_ledger(&ctx).await.unwrap();
        if let Some(availability) = candidate_availability {
            contract
                .create_asset(&ctx, CANDIDATE_ASSET_ID, availability, 0, 0)
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_legacy_never_signals() {
        for candidate in [None, Some(0), Some(98), Some(99), Some(100), Some(-5)] {
            let store = seeded(candidate).await;
            let ctx = TxContext::new(&store);
            let outcome = AssetContract::new().compare_and_decide(&ctx).await.unwrap();

            assert_eq!(outcome.mode, ComparisonMode::Legacy);
            assert_eq!(outcome.reference_availability, 99);
            assert_eq!(outcome.compared_availability, 99);
            assert_eq!(outcome.signal, TransferSignal::NoAction);
            assert!(!outcome.should_transfer());
        }
    }

    #[tokio::test]
    async fn test_legacy_ignores_corrupt_candidate() {
        let store = seeded(None).await;
        store
            .put_state(CANDIDATE_ASSET_ID, b"garbage".to_vec())
            .await
            .unwrap();
        let ctx = TxContext::new(&store);
        let outcome = AssetContract::new().compare_and_decide(&ctx).await.unwrap();
        assert_eq!(outcome.signal, TransferSignal::NoAction);
    }

    #[tokio::test]
    async fn test_reference_missing_fails_in_both_modes() {
        let store = InMemoryWorldState::new();
        let ctx = TxContext::new(&store);
        for mode in [ComparisonMode::Legacy, ComparisonMode::Strict] {
            let err = AssetContract::with_mode(mode)
                .compare_and_decide(&ctx)
                .await
                .unwrap_err();
            assert!(matches!(err, AssetError::NotFound(ref id) if id == REFERENCE_ASSET_ID));
        }
    }

    #[tokio::test]
    async fn test_strict_signals_when_candidate_lower() {
        let store = seeded(Some(80)).await;
        let ctx = TxContext::new(&store);
        let outcome = AssetContract::with_mode(ComparisonMode::Strict)
            .compare_and_decide(&ctx)
            .await
            .unwrap();
        assert_eq!(outcome.compared_availability, 80);
        assert_eq!(outcome.signal, TransferSignal::TransferRefund);
    }

    #[tokio::test]
    async fn test_strict_no_action_when_candidate_not_lower() {
        for candidate in [99, 120] {
            let store = seeded(Some(candidate)).await;
            let ctx = TxContext::new(&store);
            let outcome = AssetContract::with_mode(ComparisonMode::Strict)
                .compare_and_decide(&ctx)
                .await
                .unwrap();
            assert_eq!(outcome.signal, TransferSignal::NoAction);
        }
    }

    #[tokio::test]
    async fn test_strict_propagates_candidate_error() {
        let store = seeded(None).await;
        let ctx = TxContext::new(&store);
        let err = AssetContract::with_mode(ComparisonMode::Strict)
            .compare_and_decide(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref id) if id == CANDIDATE_ASSET_ID));
    }

    #[tokio::test]
    async fn test_compare_never_writes() {
        let store = FlakyState::default();
        let ctx = TxContext::new(&store);
        let contract = AssetContract::with_mode(ComparisonMode::Strict);
        contract.init_ledger(&ctx).await.unwrap();
        contract
            .create_asset(&ctx, CANDIDATE_ASSET_ID, 1, 1, 1)
            .await
            .unwrap();
        let writes = store.writes.load(std::sync::atomic::Ordering::SeqCst);

        contract.compare_and_decide(&ctx).await.unwrap();
        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), writes);
    }

    #[tokio::test]
    async fn test_transfer_refund_missing() {
        let store = InMemoryWorldState::new();
        let ctx = TxContext::new(&store);
        let err = AssetContract::new()
            .transfer_refund(&ctx, "ghost", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Strict".parse::<ComparisonMode>().unwrap(), ComparisonMode::Strict);
        assert_eq!("legacy".parse::<ComparisonMode>().unwrap(), ComparisonMode::Legacy);
        assert!("fixed".parse::<ComparisonMode>().is_err());
        assert_eq!(ComparisonMode::default().to_string(), "legacy");
    }

    proptest! {
        #[test]
        fn prop_transfer_refund_returns_previous_wallet(
            availability in any::<i64>(),
            wallet in any::<i64>(),
            latency in any::<i64>(),
            new_wallet in any::<i64>(),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (old, after) = rt.block_on(async {
                let store = InMemoryWorldState::new();
                let ctx = TxContext::new(&store);
                let contract = AssetContract::new();
                contract.create_asset(&ctx, "p", availability, wallet, latency).await.unwrap();
                let old = contract.transfer_refund(&ctx, "p", new_wallet).await.unwrap();
                (old, contract.read_asset(&ctx, "p").await.unwrap())
            });
            prop_assert_eq!(old, wallet);
            prop_assert_eq!(after, Asset::new("p", availability, new_wallet, latency));
        }
    }
}
