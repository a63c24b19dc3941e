//! Route table and request fallback.
//!
//! Unmatched paths under the reserved API prefixes return a 404 echoing
//! the method and path; everything else falls through to static asset
//! serving from the configured directory.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Paths under these prefixes never reach the static handler.
const RESERVED_PREFIXES: &[&str] = &[
    "/prontuario",
    "/prontuarios",
    "/exames",
    "/ai-diagnostico",
    "/health",
];

/// Build the application router.
pub fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/prontuario", post(endpoints::prontuarios::create))
        .route(
            "/prontuario/:id",
            put(endpoints::prontuarios::update).delete(endpoints::prontuarios::delete),
        )
        .route("/prontuarios", get(endpoints::prontuarios::list))
        .route("/exames/upload", post(endpoints::exames::upload))
        .route("/exames/texto", post(endpoints::exames::texto))
        .route("/exames", get(endpoints::exames::list))
        .route("/ai-diagnostico", post(endpoints::diagnostico::sugerir))
        .fallback(fallback)
        .with_state(ctx)
}

async fn fallback(State(ctx): State<ApiContext>, req: Request) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if RESERVED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Rota não encontrada: {method} {path}") })),
        )
            .into_response();
    }

    match ServeDir::new(&ctx.config.static_dir).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(infallible) => match infallible {},
    }
}
