//! Mine Handler
//!
//! Credits mined coins to a user.

use std::sync::Arc;

use crate::domain::OperationContext;
use crate::error::AppError;
use crate::ledger::Ledger;

use super::{MineCommand, MineResult};

/// Handler for mining
pub struct MineHandler {
    ledger: Arc<Ledger>,
}

impl MineHandler {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Execute the mine command
    pub async fn execute(
        &self,
        command: MineCommand,
        context: &OperationContext,
    ) -> Result<MineResult, AppError> {
        // Waits for any withdrawal in flight for this user
        let _guard = self.ledger.lock_user(&command.username).await;

        let balance_dc = match self.ledger.credit(&command.username, command.amount).await {
            Ok(balance_dc) => balance_dc,
            Err(e) => {
                tracing::warn!(
                    username = %command.username,
                    amount = command.amount,
                    correlation_id = %context.correlation_id,
                    "Mine would overflow the balance, rejected"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            username = %command.username,
            amount = command.amount,
            balance_dc,
            correlation_id = %context.correlation_id,
            client_ip = ?context.client_ip,
            "Mined coins"
        );

        Ok(MineResult { balance_dc })
    }
}
