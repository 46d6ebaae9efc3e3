//! Common test utilities

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use davcoin_ledger::api::{self, AppState, FixedWindowLimiter};
use davcoin_ledger::provider::{ProviderError, TransferProvider, TransferRequest};
use davcoin_ledger::store::JsonFileStore;
use davcoin_ledger::{ExchangeRates, Ledger};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Provider double: succeeds or rejects every transfer, counting calls
pub struct StubProvider {
    pub succeed: bool,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(succeed: bool) -> Arc<Self> {
        Arc::new(Self {
            succeed,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransferProvider for StubProvider {
    async fn transfer(&self, request: &TransferRequest) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            Ok(json!({
                "status": true,
                "data": {"reference": "trf_001", "amount": request.amount}
            }))
        } else {
            Err(ProviderError::Rejected {
                status: 400,
                body: json!({"status": false, "message": "Account number is invalid"}),
            })
        }
    }
}

/// A router over a fresh state file in a temp dir
pub struct TestApp {
    pub router: Router,
    pub ledger: Arc<Ledger>,
    pub store: JsonFileStore,
    pub dir: TempDir,
}

/// Setup an app with rates 1500 NGN/USD and 0.01 USD/DC
pub async fn setup_app(provider: Arc<StubProvider>) -> TestApp {
    setup_app_with_window(provider, Duration::from_secs(60)).await
}

/// Same as [`setup_app`], with 5 withdrawals per `window`
pub async fn setup_app_with_window(provider: Arc<StubProvider>, window: Duration) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("data.json"));
    let ledger = Arc::new(
        Ledger::open(ExchangeRates::new(1500.0, 0.01), Arc::new(store.clone())).await,
    );

    let limiter = FixedWindowLimiter::new(5, window);
    let state = AppState::new(ledger.clone(), provider, limiter);

    TestApp {
        router: api::create_router(state),
        ledger,
        store,
        dir,
    }
}

/// Send a request from `client` and decode the response body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    client: SocketAddr,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let mut req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    req.extensions_mut().insert(ConnectInfo(client));

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, json)
}

pub fn client(n: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, n], 40000))
}
