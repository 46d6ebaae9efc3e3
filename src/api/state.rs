//! Shared application state

use std::sync::Arc;

use crate::ledger::Ledger;
use crate::provider::TransferProvider;

use super::rate_limit::FixedWindowLimiter;

/// Everything request handlers need, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub provider: Arc<dyn TransferProvider>,
    pub withdraw_limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub fn new(
        ledger: Arc<Ledger>,
        provider: Arc<dyn TransferProvider>,
        withdraw_limiter: FixedWindowLimiter,
    ) -> Self {
        Self {
            ledger,
            provider,
            withdraw_limiter: Arc::new(withdraw_limiter),
        }
    }
}
