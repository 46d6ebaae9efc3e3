//! User lookup handler
//!
//! Returns a user's balance, creating the user on first reference.

use std::sync::Arc;

use crate::domain::OperationContext;
use crate::ledger::Ledger;

use super::UserView;

/// Handler for user lookups
pub struct UserHandler {
    ledger: Arc<Ledger>,
}

impl UserHandler {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Fetch (or create) the user
    pub async fn execute(&self, username: &str, context: &OperationContext) -> UserView {
        let (user, rates) = self.ledger.ensure_user(username).await;

        tracing::debug!(
            username,
            balance_dc = user.balance_dc,
            correlation_id = %context.correlation_id,
            "Fetched user"
        );

        UserView {
            username: username.to_string(),
            balance_dc: user.balance_dc,
            rates,
        }
    }
}
