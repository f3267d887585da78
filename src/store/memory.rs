use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::record::JobPosting;

use super::{JobStore, StoreError};

/// In-memory store for tests and one-shot sessions where the caller
/// drains the documents itself after the crawl.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, serde_json::Value>>,
}

fn document_key(index: &str, key: &str) -> String {
    format!("{}/{}", index, key)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: &str, key: &str) -> Option<serde_json::Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&document_key(index, key))
            .cloned()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn exists(&self, index: &str, key: &str) -> Result<bool, StoreError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.contains_key(&document_key(index, key)))
    }

    async fn put(&self, index: &str, key: &str, record: &JobPosting) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)?;
        let mut documents = self.documents.lock().unwrap();
        documents.insert(document_key(index, key), document);
        Ok(())
    }
}
