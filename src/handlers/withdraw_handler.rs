//! Withdraw Handler
//!
//! Converts coins to NGN and pays them out through the provider,
//! giving the coins back if the payout fails.

use std::sync::Arc;

use crate::domain::{DomainError, OperationContext};
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::provider::{TransferProvider, TransferRequest};

use super::{WithdrawCommand, WithdrawResult};

/// Handler for withdrawals
pub struct WithdrawHandler {
    ledger: Arc<Ledger>,
    provider: Arc<dyn TransferProvider>,
}

impl WithdrawHandler {
    pub fn new(ledger: Arc<Ledger>, provider: Arc<dyn TransferProvider>) -> Self {
        Self { ledger, provider }
    }

    /// Execute the withdraw command
    pub async fn execute(
        &self,
        command: WithdrawCommand,
        context: &OperationContext,
    ) -> Result<WithdrawResult, AppError> {
        // Held until the provider has answered and the ledger is settled
        let _guard = self.ledger.lock_user(&command.username).await;

        let reservation = self
            .ledger
            .reserve(&command.username, command.amount_ngn)
            .await?;

        tracing::info!(
            username = %command.username,
            amount_ngn = command.amount_ngn,
            coins = reservation.coins,
            correlation_id = %context.correlation_id,
            client_ip = ?context.client_ip,
            "Reserved coins for withdrawal"
        );

        let request = TransferRequest {
            amount: command.amount_ngn,
            recipient: command.recipient_account.clone(),
        };

        match self.provider.transfer(&request).await {
            Ok(transaction) => {
                self.ledger.confirm().await;

                tracing::info!(
                    username = %command.username,
                    amount_ngn = command.amount_ngn,
                    balance_dc = reservation.balance_dc,
                    correlation_id = %context.correlation_id,
                    "Withdrawal completed"
                );

                Ok(WithdrawResult {
                    coins_deducted: reservation.deducted,
                    balance_dc: reservation.balance_dc,
                    transaction,
                })
            }
            Err(e) => {
                // The transfer carries no idempotency key: if the provider did
                // pay but the response was lost, this still credits the coins back.
                let balance_dc = self.ledger.rollback(&command.username, &reservation).await;

                tracing::warn!(
                    username = %command.username,
                    amount_ngn = command.amount_ngn,
                    balance_dc,
                    error = %e,
                    correlation_id = %context.correlation_id,
                    "Withdrawal failed, coins restored"
                );

                Err(DomainError::ProviderTransferFailed {
                    details: e.details(),
                }
                .into())
            }
        }
    }
}
