use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::payload::{BalanceResponse, TransactionBatch};

const ERROR_BODY_PREVIEW_CHARS: usize = 256;

#[async_trait(?Send)]
pub trait DashboardApi {
    async fn fetch_balance(&self) -> Result<BalanceResponse, FetchError>;
    async fn fetch_transactions(&self) -> Result<TransactionBatch, FetchError>;
}

/// Decodes a JSON response body.
///
/// The body is decoded whatever the status, so an error status carrying a
/// well-formed `{ "success": false }` payload still reaches the caller as data.
/// Only an undecodable body turns into an error, classified by status.
pub fn decode_json_body<T: DeserializeOwned>(status: u16, raw: &str) -> Result<T, FetchError> {
    match serde_json::from_str(raw) {
        Ok(decoded) => Ok(decoded),
        Err(error) if (200..=299).contains(&status) => Err(FetchError::decode(error.to_string())),
        Err(_) => Err(FetchError::Http {
            status,
            body: raw.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
        }),
    }
}
