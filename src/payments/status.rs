//! Payment status tracking
//!
//! Statuses are kept per order id for the lifetime of the process. The store
//! is owned by `AppState` and handed to handlers; nothing is global.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment handed to the gateway, no outcome known yet.
    Pending,
    /// No online payment; collected at delivery.
    CashOnDelivery,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl PaymentRecord {
    /// Record returned for ids this process has not seen.
    pub fn unknown() -> Self {
        Self {
            status: PaymentStatus::Pending,
            timestamp: None,
            amount: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct PaymentStatusStore {
    records: DashMap<String, PaymentRecord>,
}

impl PaymentStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status of an order, replacing any earlier record.
    pub fn record(&self, order_id: &str, status: PaymentStatus, amount: Option<String>) {
        self.records.insert(
            order_id.to_string(),
            PaymentRecord {
                status,
                timestamp: Some(Utc::now()),
                amount,
            },
        );
    }

    /// Current record, or a bare `pending` one for unknown ids.
    pub fn get(&self, order_id: &str) -> PaymentRecord {
        self.records
            .get(order_id)
            .map(|r| r.value().clone())
            .unwrap_or_else(PaymentRecord::unknown)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record.
    pub fn clear(&self) {
        self.records.clear();
    }
}
