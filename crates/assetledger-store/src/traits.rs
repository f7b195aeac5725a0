use async_trait::async_trait;

use assetledger_types::StoreError;

/// Key-value world state consumed by the contract.
///
/// Implementations give per-key atomic get/put/delete. Existence rules and
/// conditional writes live in the contract, not here.
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Read the value at `key`. A missing key is `Ok(None)`.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Unconditionally write `value` at `key`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn del_state(&self, key: &str) -> Result<(), StoreError>;
}
