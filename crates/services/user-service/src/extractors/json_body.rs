//! Lenient JSON body extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use common::AppError;

/// JSON extractor that ignores the `Content-Type` header and reports any
/// decoding failure (including truncated input) as a 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::bad_request(e.to_string())
        })?;

        Ok(JsonBody(value))
    }
}
