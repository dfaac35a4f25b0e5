use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::services;
use crate::{error::AppResult, state::AppState, store::Device};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuery {
    #[serde(default)]
    pub device_id: String,
}

pub fn device_routes() -> Router<AppState> {
    Router::new().route("/device", get(get_device).put(put_device))
}

/// Responds with `null` when the device has not reported yet.
#[instrument(skip(state))]
pub async fn get_device(
    State(state): State<AppState>,
    Query(q): Query<DeviceQuery>,
) -> AppResult<Json<Option<Device>>> {
    let device = services::lookup_device(&state, &q.device_id).await?;
    Ok(Json(device))
}

#[instrument(skip(state, device))]
pub async fn put_device(
    State(state): State<AppState>,
    Json(device): Json<Device>,
) -> AppResult<StatusCode> {
    services::ingest_device(&state, device).await?;
    Ok(StatusCode::NO_CONTENT)
}
