//! Index store clients
//!
//! Provisioning talks to the search engine through [`IndexStore`]:
//! - [`OpenSearchClient`] speaks the OpenSearch REST API over reqwest
//! - [`InMemoryStore`] keeps indices in memory, for tests and local runs

mod memory;
mod opensearch;

pub use memory::InMemoryStore;
pub use opensearch::OpenSearchClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Cluster identity reported by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub cluster_name: String,
    pub version: String,
}

/// Result of a create-index request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Another process created the index first
    AlreadyExists,
}

#[async_trait]
pub trait IndexStore: Send + Sync {
    async fn ping(&self) -> Result<StoreInfo>;

    async fn index_exists(&self, index: &str) -> Result<bool>;

    /// Create an index with the given `{"mappings": ...}` body
    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateOutcome>;

    /// The `properties` object of an index mapping, or `None` if the index is absent
    async fn get_mapping(&self, index: &str) -> Result<Option<Value>>;
}
