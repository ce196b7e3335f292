//! In-process document collection
//!
//! The document store is an external collaborator to these services; the
//! only contract assumed is find/save/delete by key or predicate with
//! last-write-wins per document. `MemoryCollection` is that contract's
//! in-process realization, shared by one `Arc` per service and safe for
//! concurrent request handlers. Service repositories wrap it behind a
//! trait so tests can mock them.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// A single keyed document collection.
pub struct MemoryCollection<T: Clone> {
    documents: RwLock<HashMap<String, T>>,
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the document at `key` (last write wins).
    pub async fn upsert(&self, key: &str, document: T) {
        self.documents
            .write()
            .await
            .insert(key.to_string(), document);
    }

    pub async fn find(&self, key: &str) -> Option<T> {
        self.documents.read().await.get(key).cloned()
    }

    pub async fn find_all(&self) -> Vec<T> {
        self.documents.read().await.values().cloned().collect()
    }

    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.documents
            .read()
            .await
            .values()
            .filter(|doc| predicate(doc))
            .cloned()
            .collect()
    }

    /// Remove the document at `key`, returning whether it existed.
    pub async fn remove(&self, key: &str) -> bool {
        self.documents.write().await.remove(key).is_some()
    }

    /// Remove every document matching the predicate, returning how many.
    pub async fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, doc| !predicate(doc));
        before - documents.len()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl<T: Clone> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
