//! Runtime configuration
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file by `main`). Credentials have no defaults and must be provided.

use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

pub const DEFAULT_ERP_BASE_URL: &str = "https://indiankadai.com";
pub const DEFAULT_PAYHERE_ENDPOINT: &str = "https://sandbox.payhere.lk/pay/checkout";
pub const DEFAULT_RETURN_URL: &str = "http://localhost:3000/payment-success";
pub const DEFAULT_CANCEL_URL: &str = "http://localhost:3000/payment-failure";
pub const DEFAULT_NOTIFY_URL: &str = "https://indiankadai.com/api/payhere-notify";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Token pair sent to the ERP system as `Authorization: token key:secret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErpCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ErpCredentials {
    pub fn authorization(&self) -> String {
        format!("token {}:{}", self.api_key, self.api_secret)
    }
}

/// Merchant identity used to sign payment requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantCredentials {
    pub merchant_id: String,
    pub merchant_secret: String,
}

/// Narrow capability through which request handling reads secrets.
pub trait SecretsProvider: Send + Sync {
    fn erp_credentials(&self) -> ErpCredentials;
    fn merchant_credentials(&self) -> MerchantCredentials;
}

/// Fixed gateway URLs placed into every payment payload.
#[derive(Debug, Clone)]
pub struct PaymentUrls {
    pub checkout_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub erp_base_url: String,
    pub erp: ErpCredentials,
    pub merchant: MerchantCredentials,
    pub payment_urls: PaymentUrls,
    pub port: u16,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Reads the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            erp_base_url: or_default("ERP_BASE_URL", DEFAULT_ERP_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            erp: ErpCredentials {
                api_key: required("ERP_API_KEY")?,
                api_secret: required("ERP_API_SECRET")?,
            },
            merchant: MerchantCredentials {
                merchant_id: required("PAYHERE_MERCHANT_ID")?,
                merchant_secret: required("PAYHERE_MERCHANT_SECRET")?,
            },
            payment_urls: PaymentUrls {
                checkout_url: or_default("PAYHERE_ENDPOINT", DEFAULT_PAYHERE_ENDPOINT),
                return_url: or_default("PAYHERE_RETURN_URL", DEFAULT_RETURN_URL),
                cancel_url: or_default("PAYHERE_CANCEL_URL", DEFAULT_CANCEL_URL),
                notify_url: or_default("PAYHERE_NOTIFY_URL", DEFAULT_NOTIFY_URL),
            },
            port,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl SecretsProvider for Config {
    fn erp_credentials(&self) -> ErpCredentials {
        self.erp.clone()
    }

    fn merchant_credentials(&self) -> MerchantCredentials {
        self.merchant.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDS: [(&str, &str); 4] = [
        ("ERP_API_KEY", "key"),
        ("ERP_API_SECRET", "secret"),
        ("PAYHERE_MERCHANT_ID", "1224574"),
        ("PAYHERE_MERCHANT_SECRET", "S3CR3T"),
    ];

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup(&CREDS)).unwrap();

        assert_eq!(config.erp_base_url, DEFAULT_ERP_BASE_URL);
        assert_eq!(config.port, 8000);
        assert_eq!(config.upstream_timeout, Duration::from_secs(20));
        assert_eq!(config.payment_urls.checkout_url, DEFAULT_PAYHERE_ENDPOINT);
        assert_eq!(config.erp.authorization(), "token key:secret");
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let err = Config::from_lookup(lookup(&CREDS[..1])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ERP_API_SECRET")));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = CREDS.to_vec();
        pairs.push(("PORT", "9100"));
        pairs.push(("ERP_BASE_URL", "http://erp.local/"));
        pairs.push(("UPSTREAM_TIMEOUT_SECS", "5"));

        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.erp_base_url, "http://erp.local");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_port_is_reported() {
        let mut pairs = CREDS.to_vec();
        pairs.push(("PORT", "eighty"));

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
