// Request body extraction.
//
// `JsonBody<T>` reads the raw body and decodes it as JSON regardless of the
// Content-Type header, returning `ApiError` (flat `{error}` body) on failure
// instead of Axum's plain-text rejections.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorCode};

/// Maximum REST request body in bytes (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(classify_bytes_rejection)?;
        decode_json(&bytes).map(JsonBody)
    }
}

pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes)
        .map_err(|error| ApiError::validation(format!("malformed JSON: {error}")))
}

fn classify_bytes_rejection(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("request body exceeds limit of {MAX_BODY_BYTES} bytes"),
        )
    } else {
        ApiError::validation(format!("request body error: {}", rejection.body_text()))
    }
}
