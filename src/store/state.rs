//! Ledger state
//!
//! In-memory balances plus the on-disk document shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ExchangeRates;

/// A user's coin balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "balanceDC", default, deserialize_with = "null_as_zero")]
    pub balance_dc: f64,
}

// serde_json writes non-finite floats as `null`
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// The persisted JSON document.
///
/// Every key is optional on read so that a partial file only overrides
/// the keys it actually carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<BTreeMap<String, User>>,

    #[serde(rename = "usdToNGN", default, skip_serializing_if = "Option::is_none")]
    pub usd_to_ngn: Option<f64>,

    #[serde(
        rename = "davCoinValueUSD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dav_coin_value_usd: Option<f64>,
}

impl PersistedState {
    /// Document written when no state file exists yet
    pub fn empty() -> Self {
        Self {
            users: Some(BTreeMap::new()),
            usd_to_ngn: None,
            dav_coin_value_usd: None,
        }
    }
}

/// Balances and rates held by the running service
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    pub users: BTreeMap<String, User>,
    pub rates: ExchangeRates,
}

impl LedgerState {
    /// Fresh state with no users
    pub fn new(rates: ExchangeRates) -> Self {
        Self {
            users: BTreeMap::new(),
            rates,
        }
    }

    /// Shallow merge: each top-level key present on disk replaces the
    /// in-memory value entirely. Persisted rates that are not positive
    /// are ignored.
    pub fn merge(mut self, persisted: PersistedState) -> Self {
        if let Some(users) = persisted.users {
            self.users = users;
        }
        if let Some(usd_to_ngn) = persisted.usd_to_ngn {
            if ExchangeRates::is_valid_rate(usd_to_ngn) {
                self.rates.usd_to_ngn = usd_to_ngn;
            } else {
                tracing::warn!(usd_to_ngn, "Ignoring persisted usdToNGN");
            }
        }
        if let Some(dav_coin_value_usd) = persisted.dav_coin_value_usd {
            if ExchangeRates::is_valid_rate(dav_coin_value_usd) {
                self.rates.dav_coin_value_usd = dav_coin_value_usd;
            } else {
                tracing::warn!(dav_coin_value_usd, "Ignoring persisted davCoinValueUSD");
            }
        }
        self
    }

    /// Full document for a whole-file write
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            users: Some(self.users.clone()),
            usd_to_ngn: Some(self.rates.usd_to_ngn),
            dav_coin_value_usd: Some(self.rates.dav_coin_value_usd),
        }
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.get_mut(username)
    }

    /// Get or create a user with a zero balance.
    /// Returns whether the user was created.
    pub fn ensure_user(&mut self, username: &str) -> (&mut User, bool) {
        let created = !self.users.contains_key(username);
        let user = self.users.entry(username.to_string()).or_default();
        (user, created)
    }
}
