//! Payment provider module
//!
//! Outbound transfer API used to pay out withdrawals.

mod client;

pub use client::{
    HttpTransferProvider, ProviderError, TransferProvider, TransferRequest, SECRET_KEY_HEADER,
};
