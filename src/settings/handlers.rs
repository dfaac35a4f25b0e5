use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::services;
use crate::{error::AppResult, state::AppState, store::Setting};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingForm {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub device_id: String,
}

pub fn setting_routes() -> Router<AppState> {
    Router::new().route("/setting", get(get_setting).post(post_setting))
}

#[instrument(skip(state))]
pub async fn get_setting(State(state): State<AppState>) -> AppResult<Json<Setting>> {
    let (setting, _) = services::get_or_init(&state).await?;
    Ok(Json(setting))
}

#[instrument(skip(state))]
pub async fn post_setting(
    State(state): State<AppState>,
    Form(form): Form<SettingForm>,
) -> AppResult<impl IntoResponse> {
    services::update(&state, &form.season, &form.period, &form.device_id).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]))
}
