//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::OperationContext;
use crate::error::AppResult;
use crate::handlers::{
    MineCommand, MineHandler, UserHandler, WithdrawCommand, WithdrawHandler,
};

use super::extract::Payload;
use super::middleware::{context_middleware, logging_middleware, rate_limit_middleware};
use super::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "balanceDC")]
    pub balance_dc: f64,
    #[serde(rename = "usdToNGN")]
    pub usd_to_ngn: f64,
    #[serde(rename = "davCoinValueUSD")]
    pub dav_coin_value_usd: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MineRequest {
    pub username: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    #[serde(rename = "balanceDC")]
    pub balance_dc: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub username: String,
    #[serde(rename = "amountNGN")]
    pub amount_ngn: f64,
    #[serde(rename = "recipientAccount")]
    pub recipient_account: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub message: String,
    pub transaction: serde_json::Value,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router with its middleware stack.
///
/// Layer order (outermost first): context -> logging -> handler, with the
/// rate limiter only in front of `/withdraw`.
pub fn create_router(state: AppState) -> Router {
    let withdraw_routes = Router::new()
        .route("/withdraw", post(withdraw))
        .route_layer(middleware::from_fn_with_state(
            state.withdraw_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/user/:username", get(get_user))
        .route("/mine", post(mine))
        .merge(withdraw_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(context_middleware))
        .with_state(state)
}

// =========================================================================
// GET /
// =========================================================================

/// Liveness
async fn index() -> &'static str {
    "DavCoin ledger is running"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// =========================================================================
// GET /user/:username
// =========================================================================

/// Get (or create) a user's balance
async fn get_user(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(username): Path<String>,
) -> Json<UserResponse> {
    let view = UserHandler::new(state.ledger)
        .execute(&username, &context)
        .await;

    Json(UserResponse {
        username: view.username,
        balance_dc: view.balance_dc,
        usd_to_ngn: view.rates.usd_to_ngn,
        dav_coin_value_usd: view.rates.dav_coin_value_usd,
    })
}

// =========================================================================
// POST /mine
// =========================================================================

/// Credit mined coins
async fn mine(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Payload(request): Payload<MineRequest>,
) -> AppResult<Json<MineResponse>> {
    let command = MineCommand::new(request.username, request.amount)?;

    let result = MineHandler::new(state.ledger)
        .execute(command, &context)
        .await?;

    Ok(Json(MineResponse {
        message: "Mining successful".to_string(),
        balance_dc: result.balance_dc,
    }))
}

// =========================================================================
// POST /withdraw
// =========================================================================

/// Pay out NGN through the provider
async fn withdraw(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Payload(request): Payload<WithdrawRequest>,
) -> AppResult<Json<WithdrawResponse>> {
    let command = WithdrawCommand::new(
        request.username,
        request.amount_ngn,
        request.recipient_account,
    )?;

    let result = WithdrawHandler::new(state.ledger, state.provider)
        .execute(command, &context)
        .await?;

    Ok(Json(WithdrawResponse {
        message: "Withdrawal successful".to_string(),
        transaction: result.transaction,
    }))
}
