//! API module
//!
//! HTTP API endpoints and middleware.

pub mod extract;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use rate_limit::FixedWindowLimiter;
pub use routes::create_router;
pub use state::AppState;
