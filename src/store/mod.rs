//! Storage collaborators. The crawl core only needs two operations
//! from a store: a key-existence check and a keyed document write.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::JobPosting;

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend: {0}")]
    Backend(String),
    #[error("serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
}

/// Document-oriented store keyed by string identity within a named
/// index. Implementations are shared across concurrently completing
/// extraction tasks.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn exists(&self, index: &str, key: &str) -> Result<bool, StoreError>;

    async fn put(&self, index: &str, key: &str, record: &JobPosting) -> Result<(), StoreError>;
}

/// Persistence gate: write `record` only if its identity key is absent
/// from the index. Returns whether a write happened.
///
/// The check-then-write pair is not atomic. A posting discovered twice
/// in flight can race past the check, so dedup is best-effort within a
/// session; re-crawls against a warm store stay idempotent.
pub async fn persist_new(
    store: &dyn JobStore,
    index: &str,
    record: &JobPosting,
) -> Result<bool, StoreError> {
    let key = record.identity_key();
    if store.exists(index, &key).await? {
        log::debug!("already stored, skipping {:?}", key);
        return Ok(false);
    }
    store.put(index, &key, record).await?;
    Ok(true)
}
