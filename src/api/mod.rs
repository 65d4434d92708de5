//! Admin HTTP API (read-only)
//!
//! - GET /health - Store connectivity and uptime
//! - GET /indices - Registry indices and whether they exist
//! - GET /indices/drift - Mapping drift report
//! - GET /indices/:name/mapping - Create-index body of one index

mod health;
mod indices;

pub use health::health_check;
pub use indices::{get_drift, get_mapping, list_indices};

use crate::store::IndexStore;
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for admin endpoints
pub struct AppState {
    pub store: Arc<dyn IndexStore>,
    pub started_at: DateTime<Utc>,
    pub started: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn IndexStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/indices", get(list_indices))
        .route("/indices/drift", get(get_drift))
        .route("/indices/:name/mapping", get(get_mapping))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::ensure_indices_exist;
    use crate::store::InMemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn provisioned_app() -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        ensure_indices_exist(&*store).await.unwrap();
        let state = Arc::new(AppState::new(store.clone()));
        (router(state), store)
    }

    #[tokio::test]
    async fn test_health_healthy() {
        let (app, _) = provisioned_app().await;
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store_connected"], true);
        assert_eq!(body["cluster_name"], "in-memory");
        assert_eq!(body["indices"], 4);
        assert!(body["uptime_seconds"].is_u64());
        assert!(body["started_at"].is_string());
        assert!(body.get("indices_present").is_none());
    }

    #[tokio::test]
    async fn test_health_degraded() {
        let (app, store) = provisioned_app().await;
        store.set_unavailable(true);

        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["store_connected"], false);
        assert_eq!(body["indices"], 0);
    }

    #[tokio::test]
    async fn test_list_indices() {
        let store = Arc::new(InMemoryStore::new().with_index("yookve_users", serde_json::json!({})));
        let app = router(Arc::new(AppState::new(store)));

        let (status, body) = get_json(app, "/indices").await;
        assert_eq!(status, StatusCode::OK);

        let indices = body["indices"].as_array().unwrap();
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0]["name"], "yookve_users");
        assert_eq!(indices[0]["exists"], true);
        assert_eq!(indices[0]["field_count"], 5);
        assert_eq!(indices[1]["exists"], false);
        assert_eq!(indices[0]["fingerprint"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_get_mapping() {
        let (app, _) = provisioned_app().await;
        let (status, body) = get_json(app, "/indices/yookve_bookings/mapping").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mappings"]["properties"]["status"]["type"], "keyword");
        assert_eq!(body["mappings"]["properties"]["totalPrice"]["type"], "integer");
    }

    #[tokio::test]
    async fn test_get_mapping_unknown_index() {
        let (app, _) = provisioned_app().await;
        let (status, body) = get_json(app, "/indices/unknown/mapping").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown_index");
        assert_eq!(body["index"], "unknown");
    }

    #[tokio::test]
    async fn test_drift_endpoint() {
        let (app, _) = provisioned_app().await;
        let (status, body) = get_json(app, "/indices/drift").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["passed"], true);

        let empty = router(Arc::new(AppState::new(Arc::new(InMemoryStore::new()))));
        let (status, body) = get_json(empty, "/indices/drift").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["passed"], false);
        assert_eq!(body["report"]["missing_indices"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_drift_endpoint_store_down() {
        let (app, store) = provisioned_app().await;
        store.set_unavailable(true);

        let (status, body) = get_json(app, "/indices/drift").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "connection_failed");
    }
}
