use thiserror::Error;

/// Failures reported by a world-state backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot codec error: {0}")]
    Codec(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset already exists: {0}")]
    AlreadyExists(String),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Corrupt asset {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("World state unavailable ({context}): {source}")]
    StoreUnavailable {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AssetError {
    /// Wrap a backend failure with the operation and key that triggered it.
    pub fn store_unavailable(context: impl Into<String>, source: StoreError) -> Self {
        Self::StoreUnavailable {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
