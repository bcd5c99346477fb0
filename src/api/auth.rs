use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use super::AppState;

/// Credentials carried by an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Both halves are compared in constant time, and both are always compared.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

/// Guards the catalog write routes with the configured credential pair.
pub async fn basic_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let auth = &state.config().auth;
    let credentials = extract_basic_credentials(request.headers());

    match credentials {
        Some(creds) if creds.matches(&auth.username, &auth.password) => {
            tracing::Span::current().record("user_id", creds.username.as_str());
            next.run(request).await
        }
        Some(creds) => {
            tracing::warn!(username = %creds.username, "Rejected basic auth credentials");
            unauthorized(&auth.realm)
        }
        None => unauthorized(&auth.realm),
    }
}

pub fn extract_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn unauthorized(realm: &str) -> Response {
    let challenge = HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic"));

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, challenge)],
        "Unauthorized",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_basic_credentials() {
        let encoded = STANDARD.encode("admin:s3cr:et");
        let creds = extract_basic_credentials(&headers(&format!("Basic {encoded}"))).unwrap();

        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "s3cr:et");
    }

    #[test]
    fn test_credentials_match_exactly() {
        let creds = BasicCredentials {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
        };

        assert!(creds.matches("admin", "s3cret"));
        assert!(!creds.matches("admin", "s3cre"));
        assert!(!creds.matches("admin", "s3cret!"));
        assert!(!creds.matches("Admin", "s3cret"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("admin:pw");
        assert!(extract_basic_credentials(&headers(&format!("basic {encoded}"))).is_some());
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert!(extract_basic_credentials(&HeaderMap::new()).is_none());
        assert!(extract_basic_credentials(&headers("Bearer abc")).is_none());
        assert!(extract_basic_credentials(&headers("Basic !!!")).is_none());

        let no_colon = STANDARD.encode("adminpw");
        assert!(extract_basic_credentials(&headers(&format!("Basic {no_colon}"))).is_none());
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = unauthorized("filmoteka");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"filmoteka\""
        );
    }
}
