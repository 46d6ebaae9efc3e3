//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Ledger-level errors
///
/// These errors represent request validation and business rule failures.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or mistyped request fields
    #[error("Invalid payload")]
    InvalidPayload,

    /// User has never been created
    #[error("User not found")]
    UserNotFound(String),

    /// Available NGN is below the requested amount
    #[error("Insufficient balance")]
    InsufficientFunds { required: f64, available: f64 },

    /// Payment provider rejected the transfer or could not be reached
    #[error("Withdrawal failed")]
    ProviderTransferFailed { details: serde_json::Value },
}

impl DomainError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(required: f64, available: f64) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insufficient_funds_error() {
        let err = DomainError::insufficient_funds(2000.0, 1500.0);

        assert_eq!(err.to_string(), "Insufficient balance");
        assert_eq!(
            err,
            DomainError::InsufficientFunds {
                required: 2000.0,
                available: 1500.0
            }
        );
    }

    #[test]
    fn test_provider_failure_keeps_details() {
        let err = DomainError::ProviderTransferFailed {
            details: json!({"message": "Recipient account invalid"}),
        };

        assert_eq!(err.to_string(), "Withdrawal failed");
        match err {
            DomainError::ProviderTransferFailed { details } => {
                assert_eq!(details["message"], "Recipient account invalid")
            }
            other => panic!("Expected ProviderTransferFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_payload_message() {
        assert_eq!(DomainError::InvalidPayload.to_string(), "Invalid payload");
    }
}
