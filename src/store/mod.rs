//! State store module
//!
//! In-memory ledger state and its JSON file persistence.

mod error;
mod persistence;
mod state;

pub use error::PersistenceError;
pub use persistence::{JsonFileStore, StatePersistence};
pub use state::{LedgerState, PersistedState, User};
