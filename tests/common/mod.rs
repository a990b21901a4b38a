//! Shared test fixtures: a mock ERP server and a configured storefront app.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use storefront_rust::{
    config::Config,
    router::create_app_router,
    state::{AppState, SharedState},
};

pub const MERCHANT_ID: &str = "1224574";
pub const MERCHANT_SECRET: &str = "S3CR3T";
pub const API_KEY: &str = "key123";
pub const API_SECRET: &str = "secret456";

/// One request seen by the mock ERP.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Canned ERP answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    /// Raw body, served as `text/html` like a proxy error page.
    Text(StatusCode, &'static str),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => (status, Json(body)).into_response(),
            Reply::Text(status, body) => {
                (status, [(CONTENT_TYPE, "text/html")], body).into_response()
            }
        }
    }
}

struct MockState {
    hits: AtomicUsize,
    requests: Mutex<Vec<Captured>>,
    create_reply: Reply,
    read_reply: Option<Reply>,
    delay: Duration,
}

/// Configures a `MockErp` before it starts.
pub struct MockErpBuilder {
    create_reply: Reply,
    read_reply: Option<Reply>,
    delay: Duration,
    timeout_secs: u64,
}

impl MockErpBuilder {
    /// Answer to every Sales Order creation.
    pub fn create_reply(mut self, reply: Reply) -> Self {
        self.create_reply = reply;
        self
    }

    /// Answer to every Sales Order read, replacing the stored order.
    pub fn read_reply(mut self, reply: Reply) -> Self {
        self.read_reply = Some(reply);
        self
    }

    /// Sleeps before answering any request.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `UPSTREAM_TIMEOUT_SECS` of the storefront built by `app()`.
    pub fn upstream_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub async fn start(self) -> MockErp {
        let state = Arc::new(MockState {
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            create_reply: self.create_reply,
            read_reply: self.read_reply,
            delay: self.delay,
        });

        let app = Router::new().fallback(erp_handler).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockErp {
            base_url: format!("http://{addr}"),
            timeout_secs: self.timeout_secs,
            state,
        }
    }
}

/// ERP stand-in listening on an ephemeral local port.
pub struct MockErp {
    pub base_url: String,
    timeout_secs: u64,
    state: Arc<MockState>,
}

impl MockErp {
    pub fn builder() -> MockErpBuilder {
        MockErpBuilder {
            create_reply: Reply::Json(StatusCode::OK, json!({ "data": { "name": "SO-ICK-0001" } })),
            read_reply: None,
            delay: Duration::ZERO,
            timeout_secs: 5,
        }
    }

    /// Starts a mock whose Sales Order creation answers `{data:{name}}`.
    pub async fn start(order_name: &str) -> Self {
        Self::builder()
            .create_reply(Reply::Json(
                StatusCode::OK,
                json!({ "data": { "name": order_name } }),
            ))
            .start()
            .await
    }

    /// Starts a mock whose Sales Order creation answers with the given JSON.
    pub async fn with_create_reply(status: StatusCode, body: Value) -> Self {
        Self::builder()
            .create_reply(Reply::Json(status, body))
            .start()
            .await
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Bodies of every Sales Order creation request.
    pub fn created_docs(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::POST && r.path == "/api/resource/Sales Order")
            .map(|r| r.body["data"].clone())
            .collect()
    }

    pub fn config(&self) -> Config {
        let vars: HashMap<&str, String> = HashMap::from([
            ("ERP_BASE_URL", self.base_url.clone()),
            ("ERP_API_KEY", API_KEY.to_string()),
            ("ERP_API_SECRET", API_SECRET.to_string()),
            ("PAYHERE_MERCHANT_ID", MERCHANT_ID.to_string()),
            ("PAYHERE_MERCHANT_SECRET", MERCHANT_SECRET.to_string()),
            ("UPSTREAM_TIMEOUT_SECS", self.timeout_secs.to_string()),
        ]);
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    pub fn state(&self) -> SharedState {
        Arc::new(AppState::from_config(Arc::new(self.config())).unwrap())
    }

    /// Storefront router wired to this mock.
    pub fn app(&self) -> Router {
        create_app_router(self.state())
    }
}

async fn erp_handler(
    State(mock): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);

    let path = uri.path().replace("%20", " ");
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    mock.requests.lock().unwrap().push(Captured {
        method: method.clone(),
        path: path.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    match (method, path.as_str()) {
        (Method::POST, "/api/method/get_item_info") => item_reply(body["item_code"].as_str()),
        (Method::POST, "/api/resource/Sales Order") => mock.create_reply.clone().into_response(),
        (Method::GET, p) if p.starts_with("/api/resource/Sales Order/") => {
            if let Some(reply) = &mock.read_reply {
                return reply.clone().into_response();
            }
            let name = p.trim_start_matches("/api/resource/Sales Order/");
            Json(json!({
                "data": {
                    "name": name,
                    "customer": "Guest Customer",
                    "transaction_date": "2026-10-19",
                    "delivery_date": "2026-10-26",
                    "currency": "LKR",
                    "docstatus": 1,
                    "cod": 1,
                    "grand_total": 200.0,
                    "status": "To Deliver and Bill",
                    "items": [
                        { "item_code": "G1", "item_name": "Ghee", "qty": 2, "rate": 100, "amount": 200 }
                    ]
                }
            }))
            .into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not found" })),
        )
            .into_response(),
    }
}

/// Item catalogue of the mock, including records with loose shapes.
fn item_reply(item_code: Option<&str>) -> Response {
    let item = match item_code {
        Some("G1") => json!({
            "item_code": "G1",
            "item_name": "Ghee",
            "price_info": { "price": 100, "currency": "LKR" },
            "image": "/files/ghee.png"
        }),
        Some("G2") => json!({
            "item_code": "G2",
            "item_name": "Gift card",
            "price_info": { "price": null, "currency": "LKR" }
        }),
        Some("G3") => json!({ "item_code": "G3", "price_info": {} }),
        Some("1234") => json!({
            "item_code": 1234,
            "item_name": "Numbered item",
            "price_info": { "price": 75, "currency": "LKR" }
        }),
        Some("BROKEN") => {
            return Reply::Text(StatusCode::OK, "<html>upstream error</html>").into_response()
        }
        _ => {
            return Reply::Json(StatusCode::NOT_FOUND, json!({ "message": "Item not found" }))
                .into_response()
        }
    };

    Json(json!({ "message": item })).into_response()
}
