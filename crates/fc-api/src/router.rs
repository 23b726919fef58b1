use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{
    ApiConfig,
    metrics::{metrics_handler, track_metrics},
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
    state::ApiState,
    v1,
};

/// Path prefix of the versioned API
pub const API_V1_PREFIX: &str = "/api/v1";

/// Routes without middleware, for callers that bring their own layers
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest(API_V1_PREFIX, v1::routes())
        .fallback(handler_404)
}

/// The full application: routes, state, metrics endpoint and middleware
pub fn app(state: ApiState, config: &ApiConfig, metrics: Option<PrometheusHandle>) -> Router {
    let mut app = router().with_state(state);

    if let Some(handle) = metrics {
        app = app.merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(handle),
        );
    }

    // Layers added last run first, so the request ID span covers everything below it
    app.layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(request_id_middleware))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "error": "The requested resource was not found" })),
    )
}
