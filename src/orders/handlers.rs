//! REST API handlers for storefront order operations
//!
//! This module implements the HTTP endpoints for item lookup, order
//! placement (online and cash on delivery), order read-back and payment
//! status checks.

use super::models::*;
use crate::{
    error::ApiError,
    payments::{PaymentRecord, PaymentStatus},
    state::SharedState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::debug;

/// Creates routes for order-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/get-item", get(get_item_by_query).post(get_item_by_body))
        .route("/api/place-order", post(place_order))
        .route("/api/place-order-cod", post(place_order_cod))
        .route("/api/get-order/:order_id", get(get_order))
        .route("/api/check-payment", get(check_payment))
        .route("/api/test", get(health))
}

/// Endpoint: GET /api/get-item?item_code=X
async fn get_item_by_query(
    State(state): State<SharedState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Query(query) = query?;
    lookup_item(&state, query).await
}

/// Endpoint: POST /api/get-item
async fn get_item_by_body(
    State(state): State<SharedState>,
    body: Result<Json<ItemQuery>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Json(query) = body?;
    lookup_item(&state, query).await
}

async fn lookup_item(state: &SharedState, query: ItemQuery) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.orders.get_item(query.item_code.as_deref()).await?;

    Ok(Json(ItemResponse {
        status: "success".to_string(),
        message: item,
    }))
}

/// Endpoint: POST /api/place-order
/// Creates the Sales Order and returns the hosted checkout payload.
async fn place_order(
    State(state): State<SharedState>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let Json(request) = body?;
    debug!(items = request.items.len(), "place-order received");

    let response = state.orders.place_order(&request).await?;
    state.payments.record(
        &response.order_id,
        PaymentStatus::Pending,
        Some(response.payment_data.amount.clone()),
    );

    Ok(Json(response))
}

/// Endpoint: POST /api/place-order-cod
async fn place_order_cod(
    State(state): State<SharedState>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<CodOrderResponse>, ApiError> {
    let Json(request) = body?;
    debug!(items = request.items.len(), "place-order-cod received");

    let response = state.orders.place_order_cod(&request).await?;
    state
        .payments
        .record(&response.order_id, PaymentStatus::CashOnDelivery, None);

    Ok(Json(response))
}

/// Endpoint: GET /api/get-order/:order_id
async fn get_order(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.get_order(&order_id).await?;

    Ok(Json(OrderResponse {
        status: "success".to_string(),
        order,
    }))
}

/// Endpoint: GET /api/check-payment?orderId=X
async fn check_payment(
    State(state): State<SharedState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<PaymentRecord>, ApiError> {
    let Query(query) = query?;
    let order_id = query
        .order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing orderId".to_string()))?;

    Ok(Json(state.payments.get(&order_id)))
}

/// Endpoint: GET /api/test
async fn health() -> Json<Value> {
    Json(json!({ "message": "Server is running!" }))
}
