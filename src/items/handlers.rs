use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::instrument;

use super::services;
use crate::{error::AppResult, state::AppState, store::Item};

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

pub fn item_routes() -> Router<AppState> {
    Router::new().route("/items", post(import_items))
}

#[instrument(skip(state, items))]
pub async fn import_items(
    State(state): State<AppState>,
    Json(items): Json<Vec<Item>>,
) -> AppResult<Json<ImportResponse>> {
    let imported = services::import_items(&state, items).await?;
    Ok(Json(ImportResponse { imported }))
}
