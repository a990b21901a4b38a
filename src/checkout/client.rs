//! HTTP client for the storefront backend
//!
//! Typed wrappers over the `/api/*` endpoints. Error bodies
//! (`{status: "error", message}`) become `CheckoutError::Api`.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::CheckoutError;
use crate::{
    erp::{ItemDetails, RemoteSalesOrder},
    orders::models::{
        CodOrderResponse, ItemResponse, OrderRequest, OrderResponse, PlaceOrderResponse,
    },
    payments::PaymentRecord,
};

/// `{message}` part of error bodies and of the liveness response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: String,
}

impl StorefrontClient {
    /// `base_url` is the backend root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CheckoutError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_item(&self, item_code: &str) -> Result<ItemDetails, CheckoutError> {
        let response = self
            .http
            .post(self.url("/api/get-item"))
            .json(&serde_json::json!({ "item_code": item_code }))
            .send()
            .await?;

        let body: ItemResponse = decode(response).await?;
        Ok(ItemDetails::from_value(&body.message))
    }

    pub async fn place_order(
        &self,
        request: &OrderRequest,
    ) -> Result<PlaceOrderResponse, CheckoutError> {
        let response = self
            .http
            .post(self.url("/api/place-order"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn place_order_cod(
        &self,
        request: &OrderRequest,
    ) -> Result<CodOrderResponse, CheckoutError> {
        let response = self
            .http
            .post(self.url("/api/place-order-cod"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<RemoteSalesOrder, CheckoutError> {
        let mut url = reqwest::Url::parse(&self.url("/api/get-order"))
            .map_err(|e| CheckoutError::Api(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| CheckoutError::Api("backend URL cannot be a base".to_string()))?
            .push(order_id);

        let response = self.http.get(url).send().await?;
        let body: OrderResponse = decode(response).await?;
        Ok(body.order)
    }

    pub async fn check_payment(&self, order_id: &str) -> Result<PaymentRecord, CheckoutError> {
        let response = self
            .http
            .get(self.url("/api/check-payment"))
            .query(&[("orderId", order_id)])
            .send()
            .await?;
        decode(response).await
    }

    /// Liveness check; returns the server's message.
    pub async fn health(&self) -> Result<String, CheckoutError> {
        let response = self.http.get(self.url("/api/test")).send().await?;
        let body: ErrorBody = decode(response).await?;
        Ok(body.message.unwrap_or_default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CheckoutError> {
    let status = response.status();
    let text = response.text().await?;
    debug!(status = status.as_u16(), bytes = text.len(), "backend response");

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(CheckoutError::Api(message));
    }

    serde_json::from_str(&text).map_err(|e| CheckoutError::Api(format!("invalid response: {e}")))
}
