//! Domain module
//!
//! Core domain types and business logic.

pub mod context;
pub mod error;
pub mod rates;

pub use context::OperationContext;
pub use error::DomainError;
pub use rates::ExchangeRates;
