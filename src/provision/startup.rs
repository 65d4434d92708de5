use crate::error::Result;
use crate::provision::{ensure_indices_exist, ProvisionReport};
use crate::store::IndexStore;
use tracing::{error, info, warn};

/// Connect to the store and provision the registry indices.
///
/// An unreachable store is fatal unless `debug` is set, in which case it is
/// logged and `None` is returned so a developer can run the admin API
/// without a cluster. Once the store answers, any provisioning failure is
/// fatal regardless of `debug`.
pub async fn provision_at_startup(
    store: &dyn IndexStore,
    debug: bool,
) -> Result<Option<ProvisionReport>> {
    match store.ping().await {
        Ok(info) => info!(
            "Connected to OpenSearch cluster '{}' (version {})",
            info.cluster_name, info.version
        ),
        Err(e) if debug => {
            warn!("OpenSearch unreachable, skipping index provisioning (DEBUG=true): {}", e);
            return Ok(None);
        }
        Err(e) => {
            error!("OpenSearch unreachable: {}", e);
            return Err(e);
        }
    }

    let report = ensure_indices_exist(store).await.map_err(|e| {
        error!("Index provisioning failed: {}", e);
        e
    })?;

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::registry::IndexName;
    use crate::store::{CreateOutcome, InMemoryStore, StoreInfo};
    use async_trait::async_trait;
    use serde_json::Value;

    #[tokio::test]
    async fn test_unreachable_store_is_fatal_outside_debug() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        let err = provision_at_startup(&store, false).await.unwrap_err();
        assert!(matches!(err, ProvisionError::ConnectionFailed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_skipped_in_debug() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        let report = provision_at_startup(&store, true).await.unwrap();
        assert!(report.is_none());
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_reachable_store_is_provisioned_in_either_mode() {
        for debug in [false, true] {
            let store = InMemoryStore::new();

            let report = provision_at_startup(&store, debug).await.unwrap().unwrap();
            assert_eq!(report.created, IndexName::ALL.to_vec());
            assert_eq!(store.index_count(), 4);
        }
    }

    /// Answers pings but rejects every create
    struct RejectingStore {
        inner: InMemoryStore,
    }

    #[async_trait]
    impl IndexStore for RejectingStore {
        async fn ping(&self) -> Result<StoreInfo> {
            self.inner.ping().await
        }

        async fn index_exists(&self, index: &str) -> Result<bool> {
            self.inner.index_exists(index).await
        }

        async fn create_index(&self, index: &str, _body: &Value) -> Result<CreateOutcome> {
            Err(ProvisionError::IndexCreateFailed {
                index: index.to_string(),
                status: 400,
                cause: "mapper_parsing_exception".to_string(),
            })
        }

        async fn get_mapping(&self, index: &str) -> Result<Option<Value>> {
            self.inner.get_mapping(index).await
        }
    }

    #[tokio::test]
    async fn test_provisioning_failure_is_fatal_even_in_debug() {
        let store = RejectingStore {
            inner: InMemoryStore::new(),
        };

        let err = provision_at_startup(&store, true).await.unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::IndexCreateFailed { status: 400, .. }
        ));
    }
}
