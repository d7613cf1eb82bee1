//! HTTP status handling for persons API responses.

use crate::error::LookupError;

/// Classify a persons API response by status.
///
/// - **2xx** → `Ok(Some(resp))`, body still unread.
/// - **404** → `Ok(None)`; the API uses it for "nobody matched".
/// - **Anything else** → [`LookupError::Api`] with the status code and body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<Option<reqwest::Response>, LookupError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(Some(resp));
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Err(LookupError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}
