//! Ledger service
//!
//! Owns the balances, serialises work per user, and flushes the whole
//! document after every mutation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{DomainError, ExchangeRates};
use crate::store::{LedgerState, PersistedState, StatePersistence, User};

/// Coins taken from a balance for an in-flight withdrawal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservation {
    /// Exact coin value of the requested NGN amount
    pub coins: f64,
    /// What actually left the balance (less than `coins` when clamped at zero)
    pub deducted: f64,
    /// Balance after the deduction
    pub balance_dc: f64,
}

/// Process-wide ledger, shared through `Arc`
pub struct Ledger {
    state: Mutex<LedgerState>,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    persistence: Arc<dyn StatePersistence>,
}

impl Ledger {
    /// Load persisted state over `rates`, or create an empty document.
    ///
    /// Load failures are logged and the defaults are kept.
    pub async fn open(rates: ExchangeRates, persistence: Arc<dyn StatePersistence>) -> Self {
        let defaults = LedgerState::new(rates);

        let state = match persistence.load().await {
            Ok(Some(persisted)) => {
                let state = defaults.merge(persisted);
                tracing::info!(users = state.users.len(), "Loaded ledger state");
                state
            }
            Ok(None) => {
                tracing::info!("No ledger state found, creating an empty one");
                if let Err(e) = persistence.save(&PersistedState::empty()).await {
                    tracing::error!(error = %e, "Failed to create ledger state file");
                }
                defaults
            }
            Err(e) => {
                if e.is_corrupt_document() {
                    tracing::error!(error = %e, "Ledger state file is corrupt, using defaults");
                } else {
                    tracing::error!(error = %e, "Failed to read ledger state, using defaults");
                }
                defaults
            }
        };

        Self {
            state: Mutex::new(state),
            user_locks: Mutex::new(HashMap::new()),
            persistence,
        }
    }

    /// Balance of an existing user
    pub async fn balance(&self, username: &str) -> Option<f64> {
        self.state
            .lock()
            .await
            .user(username)
            .map(|u| u.balance_dc)
    }

    /// Exclusive access to one user's balance.
    ///
    /// Held across a whole mine or withdrawal, including the provider call.
    pub async fn lock_user(&self, username: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            locks
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Get or create a user, persisting on creation
    pub async fn ensure_user(&self, username: &str) -> (User, ExchangeRates) {
        let mut state = self.state.lock().await;
        let (user, created) = state.ensure_user(username);
        let user = *user;

        if created {
            tracing::info!(username, "Created user");
            self.persist(&state).await;
        }

        (user, state.rates)
    }

    /// Add `amount` (any sign) to a user's balance, creating the user if
    /// needed. Returns the new balance.
    ///
    /// A sum that leaves the `f64` range is rejected with nothing changed:
    /// JSON has no encoding for infinity and the document could not be read
    /// back.
    pub async fn credit(&self, username: &str, amount: f64) -> Result<f64, DomainError> {
        let mut state = self.state.lock().await;
        let current = state.user(username).map_or(0.0, |u| u.balance_dc);
        let balance = current + amount;
        if !balance.is_finite() {
            return Err(DomainError::InvalidPayload);
        }

        let (user, _) = state.ensure_user(username);
        user.balance_dc = balance;

        self.persist(&state).await;
        Ok(balance)
    }

    /// Check funds and take the coins for `amount_ngn` out of the balance.
    ///
    /// The deduction is in memory only; follow with [`Ledger::confirm`] or
    /// [`Ledger::rollback`].
    pub async fn reserve(&self, username: &str, amount_ngn: f64) -> Result<Reservation, DomainError> {
        let mut state = self.state.lock().await;
        let rates = state.rates;

        let user = state
            .user_mut(username)
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        // Rounded check, exact deduction
        let available = rates.available_ngn(user.balance_dc);
        if available < amount_ngn {
            return Err(DomainError::insufficient_funds(amount_ngn, available));
        }

        let coins = rates.coins_for_ngn(amount_ngn);
        let before = user.balance_dc;
        user.balance_dc = (before - coins).max(0.0);

        Ok(Reservation {
            coins,
            deducted: before - user.balance_dc,
            balance_dc: user.balance_dc,
        })
    }

    /// Persist a reservation after the transfer went through
    pub async fn confirm(&self) {
        let state = self.state.lock().await;
        self.persist(&state).await;
    }

    /// Give a reservation back after the transfer failed. Returns the
    /// restored balance.
    pub async fn rollback(&self, username: &str, reservation: &Reservation) -> f64 {
        let mut state = self.state.lock().await;
        let (user, _) = state.ensure_user(username);
        user.balance_dc += reservation.deducted;
        let balance = user.balance_dc;

        self.persist(&state).await;
        balance
    }

    async fn persist(&self, state: &LedgerState) {
        if let Err(e) = self.persistence.save(&state.snapshot()).await {
            tracing::error!(error = %e, "Failed to persist ledger state");
        }
    }
}
