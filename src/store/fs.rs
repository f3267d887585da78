use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::record::JobPosting;

use super::{JobStore, StoreError};

/// Filesystem store: one pretty-printed JSON document per record,
/// under `<root>/<index>/<key>.json`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, index: &str, key: &str) -> PathBuf {
        self.root
            .join(sanitize(index))
            .join(format!("{}.json", sanitize(key)))
    }
}

/// Identity keys are derived from page text and may contain path
/// separators or other characters hostile to filenames.
fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c => c,
        })
        .collect()
}

async fn path_exists(path: &Path) -> Result<bool, StoreError> {
    match fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io(e)),
    }
}

#[async_trait]
impl JobStore for FsStore {
    async fn exists(&self, index: &str, key: &str) -> Result<bool, StoreError> {
        path_exists(&self.document_path(index, key)).await
    }

    async fn put(&self, index: &str, key: &str, record: &JobPosting) -> Result<(), StoreError> {
        let path = self.document_path(index, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let document = serde_json::to_string_pretty(record)?;
        fs::write(&path, document).await?;
        Ok(())
    }
}
