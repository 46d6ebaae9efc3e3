//! DavCoin Ledger Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod ledger;
pub mod provider;
pub mod store;
mod error;

pub use config::Config;
pub use domain::{DomainError, ExchangeRates, OperationContext};
pub use error::{AppError, AppResult};
pub use ledger::Ledger;
