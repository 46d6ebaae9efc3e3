//! Command definitions
//!
//! Commands represent intentions to change the ledger state.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ExchangeRates};

// =========================================================================
// MineCommand
// =========================================================================

/// Command to add coins to a user's balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineCommand {
    pub username: String,
    /// Any finite value, including zero and negatives. A sum the balance
    /// cannot hold is refused by the ledger.
    pub amount: f64,
}

impl MineCommand {
    pub fn new(username: String, amount: f64) -> Result<Self, DomainError> {
        if username.is_empty() || !amount.is_finite() {
            return Err(DomainError::InvalidPayload);
        }
        Ok(Self { username, amount })
    }
}

// =========================================================================
// WithdrawCommand
// =========================================================================

/// Command to pay out NGN from a user's coin balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawCommand {
    pub username: String,
    pub amount_ngn: f64,
    pub recipient_account: String,
}

impl WithdrawCommand {
    pub fn new(
        username: String,
        amount_ngn: f64,
        recipient_account: String,
    ) -> Result<Self, DomainError> {
        if username.is_empty() || recipient_account.is_empty() || !amount_ngn.is_finite() {
            return Err(DomainError::InvalidPayload);
        }
        Ok(Self {
            username,
            amount_ngn,
            recipient_account,
        })
    }
}

/// A user's balance together with the rates it converts at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
    pub balance_dc: f64,
    pub rates: ExchangeRates,
}

/// Result of a successful mine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineResult {
    pub balance_dc: f64,
}

/// Result of a successful withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResult {
    pub coins_deducted: f64,
    pub balance_dc: f64,
    /// Provider response, untouched
    pub transaction: serde_json::Value,
}
