use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::dto::{DisplayView, IndexView, SlideView};
use super::services;
use crate::{devices::handlers::DeviceQuery, error::AppResult, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideQuery {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub missing_items: String,
}

pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/display", get(display))
        .route("/displayByDevice", get(display_by_device))
        .route("/slide", get(slide))
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<IndexView>> {
    Ok(Json(services::index_view(&state).await?))
}

/// `?contents=..&contents=..`, each value a recommendation document.
#[instrument]
pub async fn display(Query(pairs): Query<Vec<(String, String)>>) -> Json<DisplayView> {
    let contents: Vec<String> = pairs
        .into_iter()
        .filter(|(k, _)| k == "contents")
        .map(|(_, v)| v)
        .collect();
    Json(services::build_display_view_from_contents(&contents))
}

#[instrument(skip(state))]
pub async fn display_by_device(
    State(state): State<AppState>,
    Query(q): Query<DeviceQuery>,
) -> Json<DisplayView> {
    Json(services::build_display_view(&state, &q.device_id).await)
}

#[instrument(skip(state))]
pub async fn slide(
    State(state): State<AppState>,
    Query(q): Query<SlideQuery>,
) -> Json<SlideView> {
    Json(services::build_slide_view(&state, &q.item, &q.title, &q.missing_items).await)
}
