//! Error taxonomy for the storefront API
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl is the
//! single place where failures become `{status: "error", message}` bodies.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::erp::ErpError;

/// Failures surfaced to storefront callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing caller input.
    #[error("{0}")]
    BadRequest(String),

    /// No route matches the request.
    #[error("{0}")]
    NotFound(String),

    /// The ERP system answered with a body that is not the expected JSON.
    #[error("{0}")]
    UpstreamInvalidResponse(String),

    /// The ERP system answered with a non-success status or could not be reached.
    #[error("{0}")]
    Upstream(String),

    /// Sales Order creation was rejected or could not be confirmed.
    #[error("{0}")]
    SalesOrderCreateFailed(String),

    /// Anything unexpected. The detail stays in the server log.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UpstreamInvalidResponse(_) => "UPSTREAM_INVALID_RESPONSE",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::SalesOrderCreateFailed(_) => "SALES_ORDER_CREATE_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamInvalidResponse(_)
            | Self::Upstream(_)
            | Self::SalesOrderCreateFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Wraps an ERP failure raised while reading a Sales Order. Unparsable
    /// bodies count as `UPSTREAM_ERROR` here too.
    pub fn order_read(err: ErpError) -> Self {
        Self::Upstream(err.caller_message("Failed to fetch order from ERP"))
    }

    /// Wraps an ERP failure raised while creating a Sales Order.
    pub fn sales_order(err: ErpError) -> Self {
        Self::SalesOrderCreateFailed(err.caller_message("Failed to create sales order in ERP"))
    }
}

impl From<ErpError> for ApiError {
    fn from(err: ErpError) -> Self {
        match err {
            ErpError::InvalidBody(_) => {
                Self::UpstreamInvalidResponse("Invalid response from ERP".to_string())
            }
            other => Self::Upstream(other.caller_message("ERP request failed")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => tracing::error!(code = self.code(), %detail, "request failed"),
            other => tracing::warn!(code = other.code(), message = %other, "request failed"),
        }

        let body = json!({
            "status": "error",
            "message": self.public_message(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}
