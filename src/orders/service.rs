//! Order service
//!
//! Stateless translation of storefront requests into ERP calls. Each
//! operation validates its input, talks to the ERP and returns typed results;
//! HTTP concerns stay in `handlers`.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument};

use super::{helpers::*, models::*};
use crate::{
    config::{Config, PaymentUrls, SecretsProvider},
    erp::{ErpClient, ErpError, RemoteSalesOrder, SalesOrderDoc},
    error::ApiError,
};

#[derive(Clone)]
pub struct OrderService {
    erp: ErpClient,
    secrets: Arc<dyn SecretsProvider>,
    payment_urls: PaymentUrls,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("erp", &self.erp)
            .field("payment_urls", &self.payment_urls)
            .finish_non_exhaustive()
    }
}

impl OrderService {
    pub fn new(erp: ErpClient, secrets: Arc<dyn SecretsProvider>, payment_urls: PaymentUrls) -> Self {
        Self {
            erp,
            secrets,
            payment_urls,
        }
    }

    /// Builds the service and its ERP client from the loaded configuration.
    pub fn from_config(config: Arc<Config>) -> Result<Self, ErpError> {
        let secrets: Arc<dyn SecretsProvider> = config.clone();
        let erp = ErpClient::new(&config.erp_base_url, config.upstream_timeout, secrets.clone())?;
        Ok(Self::new(erp, secrets, config.payment_urls.clone()))
    }

    /// Relays an item lookup to the ERP; the parsed JSON is returned verbatim.
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_code: Option<&str>) -> Result<Value, ApiError> {
        let item_code = item_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Item code is required".to_string()))?;

        Ok(self.erp.get_item_info(item_code).await?)
    }

    /// Creates a Sales Order and prepares the hosted payment payload.
    ///
    /// Not idempotent: every call creates a new Sales Order.
    #[instrument(skip_all, fields(items = request.items.len()))]
    pub async fn place_order(&self, request: &OrderRequest) -> Result<PlaceOrderResponse, ApiError> {
        validate_order(request)?;

        let doc = SalesOrderDoc::new(customer_name(request), &request.items, Utc::now().date_naive());
        let order_id = self.create_sales_order(&doc, &request.items).await?;

        let payment_data = build_payment_data(
            request,
            &order_id,
            &self.secrets.merchant_credentials(),
            &self.payment_urls,
        );
        info!(%order_id, amount = %payment_data.amount, "payment prepared");

        Ok(PlaceOrderResponse {
            status: "success".to_string(),
            order_id,
            payment_url: self.payment_urls.checkout_url.clone(),
            payment_data,
        })
    }

    /// Creates a cash-on-delivery Sales Order.
    #[instrument(skip_all, fields(items = request.items.len()))]
    pub async fn place_order_cod(&self, request: &OrderRequest) -> Result<CodOrderResponse, ApiError> {
        validate_order(request)?;

        let doc = SalesOrderDoc::new(customer_name(request), &request.items, Utc::now().date_naive())
            .cash_on_delivery();
        let order_id = self.create_sales_order(&doc, &request.items).await?;

        Ok(CodOrderResponse {
            status: "success".to_string(),
            order_id,
        })
    }

    /// Reads back a Sales Order for the confirmation view.
    ///
    /// Every ERP failure here, unparsable bodies included, is an upstream error.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<RemoteSalesOrder, ApiError> {
        if order_id.trim().is_empty() {
            return Err(ApiError::BadRequest("Order id is required".to_string()));
        }

        self.erp
            .get_sales_order(order_id)
            .await
            .map_err(ApiError::order_read)
    }

    async fn create_sales_order(
        &self,
        doc: &SalesOrderDoc,
        items: &[OrderItem],
    ) -> Result<String, ApiError> {
        let order_id = self
            .erp
            .create_sales_order(doc)
            .await
            .map_err(ApiError::sales_order)?;

        info!(
            %order_id,
            cod = doc.cod.is_some(),
            summary = %format_item_summary(items),
            "sales order created"
        );
        Ok(order_id)
    }
}
