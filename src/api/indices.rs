use crate::api::AppState;
use crate::error::Result;
use crate::provision::{verify_mappings, DriftReport};
use crate::registry::{self, IndexName};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
pub struct IndexStatus {
    pub name: IndexName,
    pub exists: bool,
    pub field_count: usize,
    pub fingerprint: String,
}

#[derive(Serialize)]
pub struct ListIndicesResponse {
    pub indices: Vec<IndexStatus>,
    pub count: usize,
}

pub async fn list_indices(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let mut indices = Vec::with_capacity(IndexName::ALL.len());

    for index in IndexName::ALL {
        let manifest = index.manifest();
        indices.push(IndexStatus {
            name: index,
            exists: state.store.index_exists(index.as_str()).await?,
            field_count: manifest.len(),
            fingerprint: manifest.fingerprint(),
        });
    }

    let count = indices.len();
    Ok(Json(ListIndicesResponse { indices, count }))
}

pub async fn get_mapping(Path(name): Path<String>) -> Result<impl IntoResponse> {
    let manifest = registry::manifest_for(&name)?;
    debug!("Serving mapping for {}", name);
    Ok(Json(manifest.to_mapping_body()))
}

#[derive(Serialize)]
pub struct DriftResponse {
    pub passed: bool,
    pub report: DriftReport,
}

pub async fn get_drift(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let report = verify_mappings(state.store.as_ref()).await?;
    let passed = report.passed();

    let status = if passed {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    };

    Ok((status, Json(DriftResponse { passed, report })))
}
