//! Routing module for the storefront backend

use std::any::Any;

use crate::{error::ApiError, state::SharedState};
use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: CORS (the storefront is served from another origin)
    let cors_layer = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .merge(crate::orders::routes())
        .fallback(not_found)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer)
        .with_state(state)
}

/// Middleware: one span per request, tagged with a fresh request id.
async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        uri = %req.uri(),
    );

    async move {
        info!("request received");
        let mut res = next.run(req).await;
        if !res.status().is_success() {
            warn!(status = res.status().as_u16(), "request failed");
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        res
    }
    .instrument(span)
    .await
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Unknown endpoint".to_string())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());

    ApiError::Internal(detail).into_response()
}
