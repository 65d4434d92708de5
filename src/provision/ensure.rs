use crate::error::Result;
use crate::registry::IndexName;
use crate::store::{CreateOutcome, IndexStore};
use serde::Serialize;
use tracing::{debug, info};

/// What a provisioning pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub created: Vec<IndexName>,
    pub existing: Vec<IndexName>,
}

impl ProvisionReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Create every registry index the store does not have yet.
///
/// Indices that already exist are left untouched, settings and documents
/// included. Running this against a provisioned store issues no create
/// requests. Store errors are returned as-is; the caller decides whether
/// they are fatal.
pub async fn ensure_indices_exist(store: &dyn IndexStore) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();

    for index in IndexName::ALL {
        let name = index.as_str();

        if store.index_exists(name).await? {
            debug!("Index {} already exists, skipping", name);
            report.existing.push(index);
            continue;
        }

        let body = index.manifest().to_mapping_body();

        match store.create_index(name, &body).await? {
            CreateOutcome::Created => {
                info!(
                    "Created index {} ({} fields)",
                    name,
                    index.manifest().len()
                );
                report.created.push(index);
            }
            CreateOutcome::AlreadyExists => {
                debug!("Index {} was created concurrently, treating as present", name);
                report.existing.push(index);
            }
        }
    }

    info!(
        "Index provisioning complete: {} created, {} already present",
        report.created.len(),
        report.existing.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProvisionError, Result};
    use crate::store::{InMemoryStore, StoreInfo};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_creates_all_indices_on_empty_store() {
        let store = InMemoryStore::new();

        let report = ensure_indices_exist(&store).await.unwrap();

        assert_eq!(report.created, IndexName::ALL.to_vec());
        assert!(report.existing.is_empty());
        assert_eq!(store.index_count(), 4);

        for index in IndexName::ALL {
            assert_eq!(
                store.body_of(index.as_str()).unwrap(),
                index.manifest().to_mapping_body()
            );
        }
    }

    #[tokio::test]
    async fn test_second_run_issues_no_creates() {
        let store = InMemoryStore::new();

        ensure_indices_exist(&store).await.unwrap();
        assert_eq!(store.create_calls(), 4);

        let report = ensure_indices_exist(&store).await.unwrap();
        assert_eq!(store.create_calls(), 4);
        assert_eq!(report.created_count(), 0);
        assert_eq!(report.existing, IndexName::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_existing_index_is_not_touched() {
        let custom = json!({"id": {"type": "keyword"}, "legacy": {"type": "text"}});
        let store = InMemoryStore::new().with_index("yookve_users", custom.clone());

        let report = ensure_indices_exist(&store).await.unwrap();

        assert_eq!(report.existing, vec![IndexName::Users]);
        assert_eq!(report.created.len(), 3);
        assert_eq!(store.create_calls(), 3);
        assert_eq!(store.get_mapping("yookve_users").await.unwrap(), Some(custom));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        let err = ensure_indices_exist(&store).await.unwrap_err();
        assert!(matches!(err, ProvisionError::ConnectionFailed { .. }));
    }

    /// Reports every index as absent, as a racing provisioner would observe
    struct RacingStore {
        inner: InMemoryStore,
    }

    #[async_trait]
    impl IndexStore for RacingStore {
        async fn ping(&self) -> Result<StoreInfo> {
            self.inner.ping().await
        }

        async fn index_exists(&self, _index: &str) -> Result<bool> {
            Ok(false)
        }

        async fn create_index(&self, index: &str, body: &Value) -> Result<CreateOutcome> {
            self.inner.create_index(index, body).await
        }

        async fn get_mapping(&self, index: &str) -> Result<Option<Value>> {
            self.inner.get_mapping(index).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_creation_counts_as_present() {
        let store = RacingStore {
            inner: InMemoryStore::new().with_index("yookve_bookings", json!({})),
        };

        let report = ensure_indices_exist(&store).await.unwrap();

        assert_eq!(report.existing, vec![IndexName::Bookings]);
        assert_eq!(report.created.len(), 3);
    }
}
