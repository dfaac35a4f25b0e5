use crate::state::AppState;
use crate::{devices, items, settings, views};
use axum::{
    body::Body,
    http::{Request, Response},
    routing::get,
    Router,
};
use std::{net::SocketAddr, time::Duration};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::{DefaultOnRequest, TraceLayer},
};
use tracing::{field, info_span, Span};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(views::router())
        .merge(settings::router())
        .merge(devices::router())
        .merge(items::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new())
                .on_response(record_response)
                .on_failure(record_failure),
        )
}

fn request_span(req: &Request<Body>) -> Span {
    info_span!(
        "request",
        method = %req.method(),
        path = req.uri().path(),
        query = req.uri().query().unwrap_or_default(),
        status = field::Empty,
        latency_ms = field::Empty,
    )
}

fn record_response(res: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", res.status().as_u16());
    span.record("latency_ms", latency.as_millis() as u64);
    tracing::debug!("request served");
}

fn record_failure(class: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(%class, latency_ms = latency.as_millis() as u64, "request failed");
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
