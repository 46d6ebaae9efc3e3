//! Command Handlers module
//!
//! Handlers that orchestrate ledger operations for each endpoint.

mod commands;
mod mine_handler;
mod user_handler;
mod withdraw_handler;


pub use commands::*;
pub use mine_handler::MineHandler;
pub use user_handler::UserHandler;
pub use withdraw_handler::WithdrawHandler;
