use crate::api::AppState;
use crate::registry::IndexName;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cluster_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    indices: usize,
    started_at: String,
    uptime_seconds: u64,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let info = state.store.ping().await.ok();
    let store_connected = info.is_some();

    let mut indices = 0;
    if store_connected {
        for index in IndexName::ALL {
            if let Ok(true) = state.store.index_exists(index.as_str()).await {
                indices += 1;
            }
        }
    }

    let status = if store_connected && indices == IndexName::ALL.len() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        store_connected,
        cluster_name: info.as_ref().map(|i| i.cluster_name.clone()),
        version: info.map(|i| i.version),
        indices,
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}
