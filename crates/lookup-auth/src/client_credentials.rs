use chrono::{TimeDelta, Utc};

use crate::error::AuthError;
use crate::event::AuthToken;

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Obtain a bearer token with the OAuth2 client-credentials grant.
///
/// Client ID and secret go in an HTTP Basic `Authorization` header; the body
/// is `grant_type=client_credentials`. The secret is never stored.
///
/// # Errors
///
/// Returns [`AuthError::TokenRequest`] for a non-success status,
/// [`AuthError::Http`] for transport failures, and [`AuthError::Parse`] if
/// the response is not a usable token.
pub async fn fetch_token(
    http: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AuthToken, AuthError> {
    tracing::debug!(token_url, client_id, "requesting client-credentials token");

    let resp = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AuthError::TokenRequest {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }

    let body = resp.text().await?;
    let token = parse_token_response(&body)?.with_client_id(client_id);
    Ok(token)
}

/// Parse a token endpoint response body into an [`AuthToken`].
///
/// # Errors
///
/// Returns [`AuthError::Parse`] if the body is not JSON, lacks
/// `access_token`, or names a token type other than bearer.
pub fn parse_token_response(body: &str) -> Result<AuthToken, AuthError> {
    let data: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;

    if data.access_token.trim().is_empty() {
        return Err(AuthError::Parse("empty access_token".into()));
    }
    if let Some(kind) = data.token_type.as_deref()
        && !kind.eq_ignore_ascii_case("bearer")
    {
        return Err(AuthError::Parse(format!("unsupported token_type '{kind}'")));
    }

    let mut token = AuthToken::new(data.access_token);
    if let Some(secs) = data.expires_in.filter(|s| *s > 0) {
        token = token.with_expiry(Utc::now() + TimeDelta::seconds(secs));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_bearer_with_expiry() {
        let token = parse_token_response(
            r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600,"scope":"default"}"#,
        )
        .unwrap();
        assert_eq!(token.bearer(), "abc");
        assert!(token.expires_at.is_some());
        assert!(!token.is_near_expiry(60));
    }

    #[test]
    fn missing_expiry_is_allowed() {
        let token = parse_token_response(r#"{"access_token":"abc"}"#).unwrap();
        assert!(token.expires_at.is_none());
    }

    #[test]
    fn rejects_non_bearer_tokens() {
        let err = parse_token_response(r#"{"access_token":"abc","token_type":"mac"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported token_type"));
    }

    #[test]
    fn rejects_missing_access_token() {
        let err = parse_token_response(r#"{"token_type":"bearer"}"#).unwrap_err();
        assert!(matches!(err, AuthError::Parse(_)));
    }

    #[test]
    fn rejects_blank_access_token() {
        let err = parse_token_response(r#"{"access_token":"  "}"#).unwrap_err();
        assert!(err.to_string().contains("empty access_token"));
    }
}
