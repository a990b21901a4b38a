//! HTTP client for the ERP document API

use std::{sync::Arc, time::Duration};

use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::{
    models::{
        CreateEnvelope, CreatedDoc, ErpMessage, ReadEnvelope, RemoteSalesOrder,
        SalesOrderDoc, SALES_ORDER_DOCTYPE,
    },
    ErpError,
};
use crate::config::SecretsProvider;

/// Name of the whitelisted ERP method returning item data.
pub const ITEM_INFO_METHOD: &str = "get_item_info";

/// Thin wrapper over `reqwest::Client` that knows the ERP URL layout.
#[derive(Clone)]
pub struct ErpClient {
    http: Client,
    base_url: Url,
    secrets: Arc<dyn SecretsProvider>,
}

impl ErpClient {
    /// Creates a client. The connection pool is shared by every clone.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        secrets: Arc<dyn SecretsProvider>,
    ) -> Result<Self, ErpError> {
        let base_url = Url::parse(base_url).map_err(|e| ErpError::Config(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ErpError::Config(format!("{base_url} cannot be a base URL")));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            secrets,
        })
    }

    /// Looks up an item through the `get_item_info` method.
    ///
    /// ERP method calls wrap their result in `{message: ...}`; the inner
    /// document is returned when present. Any JSON is accepted as is.
    pub async fn get_item_info(&self, item_code: &str) -> Result<Value, ErpError> {
        let url = self.url(&["api", "method", ITEM_INFO_METHOD])?;
        let body = json!({ "item_code": item_code });

        let value: Value = self.send(self.request(Method::POST, url).json(&body)).await?;
        let item = match value {
            Value::Object(mut map) if map.get("message").is_some_and(Value::is_object) => {
                map.remove("message").unwrap_or(Value::Null)
            }
            other => other,
        };

        Ok(item)
    }

    /// Creates a Sales Order and returns the ERP-assigned name.
    pub async fn create_sales_order(&self, doc: &SalesOrderDoc) -> Result<String, ErpError> {
        let url = self.url(&["api", "resource", SALES_ORDER_DOCTYPE])?;
        let created: CreatedDoc = self
            .send(self.request(Method::POST, url).json(&CreateEnvelope { data: doc }))
            .await?;

        Ok(created.data.name)
    }

    /// Reads a Sales Order by name.
    pub async fn get_sales_order(&self, order_id: &str) -> Result<RemoteSalesOrder, ErpError> {
        let url = self.url(&["api", "resource", SALES_ORDER_DOCTYPE, order_id])?;
        let envelope: ReadEnvelope<RemoteSalesOrder> =
            self.send(self.request(Method::GET, url)).await?;

        Ok(envelope.data)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ErpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ErpError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let credentials = self.secrets.erp_credentials();
        self.http
            .request(method, url)
            .header(AUTHORIZATION, credentials.authorization())
    }

    /// Sends the request and decodes the body as `T`.
    ///
    /// The body is read as text first so that an unparsable answer can be
    /// told apart from a transport failure.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ErpError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let text = response.text().await?;

        debug!(%url, status = status.as_u16(), bytes = text.len(), "ERP response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErpMessage>(&text)
                .ok()
                .and_then(|m| m.text());
            return Err(ErpError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(ErpError::InvalidBody)
    }
}

impl std::fmt::Debug for ErpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
