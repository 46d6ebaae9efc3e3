//! Exchange rates
//!
//! Conversion between DavCoin balances and NGN amounts.
//! DC -> USD -> NGN, using the two configured rates.

use serde::{Deserialize, Serialize};

/// The two global rates every conversion goes through.
///
/// # Example
/// ```
/// use davcoin_ledger::domain::ExchangeRates;
///
/// let rates = ExchangeRates::new(1500.0, 0.01);
/// assert_eq!(rates.available_ngn(100.0), 1500.0);
/// assert_eq!(rates.coins_for_ngn(750.0), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    #[serde(rename = "usdToNGN")]
    pub usd_to_ngn: f64,
    #[serde(rename = "davCoinValueUSD")]
    pub dav_coin_value_usd: f64,
}

impl ExchangeRates {
    pub fn new(usd_to_ngn: f64, dav_coin_value_usd: f64) -> Self {
        Self {
            usd_to_ngn,
            dav_coin_value_usd,
        }
    }

    /// A usable rate is finite and strictly positive; anything else turns
    /// coin conversions into NaN or infinity.
    pub fn is_valid_rate(rate: f64) -> bool {
        rate.is_finite() && rate > 0.0
    }

    /// NGN per DavCoin
    pub fn ngn_per_coin(&self) -> f64 {
        self.dav_coin_value_usd * self.usd_to_ngn
    }

    /// NGN value of a balance, rounded to a whole naira.
    ///
    /// Halves round toward positive infinity, so -2.5 becomes -2.
    pub fn available_ngn(&self, balance_dc: f64) -> f64 {
        round_half_up(balance_dc * self.dav_coin_value_usd * self.usd_to_ngn)
    }

    /// Exact (unrounded) number of coins an NGN amount is worth.
    pub fn coins_for_ngn(&self, amount_ngn: f64) -> f64 {
        amount_ngn / self.ngn_per_coin()
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
