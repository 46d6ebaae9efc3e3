//! Ledger module
//!
//! Balance bookkeeping on top of the state store.

mod service;

pub use service::{Ledger, Reservation};
