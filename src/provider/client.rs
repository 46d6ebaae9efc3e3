//! Payment provider client
//!
//! One outbound call: POST a transfer to the provider and hand back its
//! JSON response untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::ProviderConfig;

/// Header carrying the provider secret key
pub const SECRET_KEY_HEADER: &str = "X-Secret-Key";

/// Transfer body sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    /// NGN amount
    pub amount: f64,
    /// Recipient account identifier
    pub recipient: String,
}

/// Errors from the provider call
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Provider answered with a non-2xx status
    #[error("Provider rejected transfer with status {status}")]
    Rejected { status: u16, body: Value },

    /// Provider could not be reached or the response could not be read
    #[error("Provider request failed: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Detail surfaced to the caller: the provider's error body, or the
    /// transport error message.
    pub fn details(&self) -> Value {
        match self {
            ProviderError::Rejected { body, .. } => body.clone(),
            ProviderError::Transport(message) => Value::String(message.clone()),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}

/// Outbound transfer seam
#[async_trait]
pub trait TransferProvider: Send + Sync {
    /// Issue a single transfer. Never retried.
    async fn transfer(&self, request: &TransferRequest) -> Result<Value, ProviderError>;
}

/// HTTP implementation with bearer-token and secret-key auth
#[derive(Debug, Clone)]
pub struct HttpTransferProvider {
    client: Client,
    transfer_url: String,
    api_key: String,
    secret_key: String,
}

impl HttpTransferProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            transfer_url: config.transfer_url.clone(),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl TransferProvider for HttpTransferProvider {
    async fn transfer(&self, request: &TransferRequest) -> Result<Value, ProviderError> {
        tracing::debug!(
            url = %self.transfer_url,
            amount = request.amount,
            "Sending transfer to provider"
        );

        let response = self
            .client
            .post(&self.transfer_url)
            .bearer_auth(&self.api_key)
            .header(SECRET_KEY_HEADER, &self.secret_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(text);

        if !status.is_success() {
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

/// JSON when the provider sent JSON, the raw text otherwise
fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
