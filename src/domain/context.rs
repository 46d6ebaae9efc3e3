//! Operation Context
//!
//! Request metadata carried into ledger logs.

use std::net::IpAddr;

use uuid::Uuid;

/// Who asked for an operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationContext {
    pub correlation_id: Uuid,
    /// Absent when the server did not record a socket address
    pub client_ip: Option<IpAddr>,
}

impl OperationContext {
    /// Context for one request, keeping the caller's correlation ID if it sent one
    pub fn for_request(correlation_id: Option<Uuid>, client_ip: Option<IpAddr>) -> Self {
        Self {
            correlation_id: correlation_id.unwrap_or_else(Uuid::new_v4),
            client_ip,
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::for_request(None, None)
    }
}
