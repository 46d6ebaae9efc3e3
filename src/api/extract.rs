//! Request body extraction
//!
//! JSON bodies whose rejections surface as the ledger's own
//! `Invalid payload` error instead of axum's plain-text rejections.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::domain::DomainError;
use crate::error::AppError;

/// JSON body extractor mapping every rejection to `InvalidPayload`
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(DomainError::InvalidPayload.into())
            }
        }
    }
}
