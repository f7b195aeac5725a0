use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AssetError, Result};

/// Key written by the bootstrap operation.
pub const SEED_ASSET_ID: &str = "asset1";

/// The single record type kept in world state.
///
/// Fields are declared in alphabetic order of their wire names. serde_json
/// emits keys in declaration order, so every node encodes the same record to
/// the same bytes. `Availibility` is the key the deployed contract writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    #[serde(rename = "Availibility", alias = "Availability")]
    pub availability: i64,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Latency")]
    pub latency: i64,
    #[serde(rename = "Wallet")]
    pub wallet: i64,
}

impl Asset {
    pub fn new(id: impl Into<String>, availability: i64, wallet: i64, latency: i64) -> Self {
        Self {
            availability,
            id: id.into(),
            latency,
            wallet,
        }
    }

    /// The record written by bootstrap.
    pub fn seed() -> Self {
        Self::new(SEED_ASSET_ID, 99, 100, 99)
    }

    /// Canonical compact JSON encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| AssetError::Serialization(e.to_string()))
    }

    /// Decode the value stored under `key`.
    ///
    /// A value that does not match the schema, or whose `ID` differs from
    /// the key it is stored under, is reported as corrupt.
    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
        let asset: Asset = serde_json::from_slice(bytes).map_err(|e| AssetError::Corrupt {
            id: key.to_string(),
            reason: e.to_string(),
        })?;
        if asset.id != key {
            return Err(AssetError::Corrupt {
                id: key.to_string(),
                reason: format!("record carries ID {:?}", asset.id),
            });
        }
        Ok(asset)
    }

    /// Lowercase hex SHA-256 of the canonical encoding.
    pub fn digest(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        let hash = Sha256::digest(&bytes);
        Ok(hash.iter().map(|b| format!("{b:02x}")).collect())
    }
}
