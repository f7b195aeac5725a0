use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::traits::WorldState;
use assetledger_types::StoreError;

/// On-disk layout of the world state snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    saved_at: Option<DateTime<Utc>>,
    entries: BTreeMap<String, Vec<u8>>,
}

/// File-backed world state with atomic writes.
///
/// The whole key/value map lives in one JSON snapshot that is loaded on open
/// and rewritten (.tmp then rename) on every put or delete. In-memory state
/// only changes once the rewrite has succeeded.
pub struct FileWorldState {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileWorldState {
    pub const FILE_NAME: &'static str = "world_state.json";

    /// Open the snapshot in `state_dir`, starting empty if it does not exist.
    pub async fn open(state_dir: &Path) -> Result<Self, StoreError> {
        let path = state_dir.join(Self::FILE_NAME);
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Codec(format!("{}: {e}", path.display())))?;
                snapshot.entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened world state");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    async fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let snapshot = Snapshot {
            saved_at: Some(Utc::now()),
            entries: entries.clone(),
        };
        let content = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Codec(e.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl WorldState for FileWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileWorldState::open(dir.path()).await.unwrap();
        assert!(store.keys().await.is_empty());
        assert!(store.get_state("asset1").await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileWorldState::open(dir.path()).await.unwrap();
            store.put_state("a", b"one".to_vec()).await.unwrap();
            store.put_state("b", b"two".to_vec()).await.unwrap();
            store.del_state("a").await.unwrap();
        }

        let reopened = FileWorldState::open(dir.path()).await.unwrap();
        assert_eq!(reopened.keys().await, vec!["b".to_string()]);
        assert_eq!(reopened.get_state("b").await.unwrap(), Some(b"two".to_vec()));
        assert!(!dir.path().join("world_state.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_garbage_snapshot_is_codec_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(FileWorldState::FILE_NAME), "{ nope").unwrap();
        let err = FileWorldState::open(dir.path()).await.err().unwrap();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
