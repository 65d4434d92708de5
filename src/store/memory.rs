use crate::error::{ProvisionError, Result};
use crate::store::{CreateOutcome, IndexStore, StoreInfo};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-process index store.
///
/// Keeps each index's create body and counts create requests so callers
/// can observe how many were issued.
#[derive(Default)]
pub struct InMemoryStore {
    indices: DashMap<String, Value>,
    create_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an index with the given `properties` object
    pub fn with_index(self, index: &str, properties: Value) -> Self {
        self.indices.insert(
            index.to_string(),
            json!({"mappings": {"properties": properties}}),
        );
        self
    }

    /// Make every subsequent call fail as if the cluster were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// The body an index was created with
    pub fn body_of(&self, index: &str) -> Option<Value> {
        self.indices.get(index).map(|entry| entry.value().clone())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProvisionError::ConnectionFailed {
                url: "memory://".to_string(),
                cause: "store marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IndexStore for InMemoryStore {
    async fn ping(&self) -> Result<StoreInfo> {
        self.check_available()?;
        Ok(StoreInfo {
            cluster_name: "in-memory".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.indices.contains_key(index))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateOutcome> {
        self.check_available()?;
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        match self.indices.entry(index.to_string()) {
            Entry::Occupied(_) => Ok(CreateOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(body.clone());
                Ok(CreateOutcome::Created)
            }
        }
    }

    async fn get_mapping(&self, index: &str) -> Result<Option<Value>> {
        self.check_available()?;
        Ok(self.indices.get(index).map(|entry| {
            entry.value()["mappings"]["properties"].clone()
        }))
    }
}
