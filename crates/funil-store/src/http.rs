//! Shared HTTP response helpers for the PostgREST client.
//!
//! Centralizes status-code checks so the store methods stay focused on
//! request construction and response mapping.

use crate::error::StoreError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Handles:
/// - **401 / 403** → [`StoreError::Unauthorized`]
/// - **Other non-success status** → [`StoreError::Api`] with status code and
///   response body (PostgREST puts a JSON error object there).
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(StoreError::Unauthorized {
            status: status.as_u16(),
            message,
        });
    }
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Read the body as text and decode it as JSON, keeping the body in the error.
pub async fn decode_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, StoreError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("{e}: {body}")))
}
