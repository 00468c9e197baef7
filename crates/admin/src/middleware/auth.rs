//! Bearer-token authentication for admin routes.
//!
//! Every admin route requires `Authorization: Bearer <ADMIN_API_TOKEN>`. The
//! token is a single shared secret; there are no per-admin accounts. The
//! admin binary binds to 127.0.0.1 and is expected to sit behind a private
//! network, the token is the second fence.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AdminError;
use crate::state::AppState;

/// Extractor that requires the shared admin bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireApiToken) -> impl IntoResponse {
///     "only with a valid token"
/// }
/// ```
pub struct RequireApiToken;

/// Check an `Authorization` header value against the configured token.
fn token_matches(header_value: Option<&str>, expected: &SecretString) -> bool {
    let Some(value) = header_value else {
        return false;
    };
    let Some(presented) = value.strip_prefix("Bearer ") else {
        return false;
    };

    // Length check first so the byte comparison below never panics on
    // mismatched slice lengths; this is a shared static secret, not a
    // password, so plain comparison is acceptable.
    let expected = expected.expose_secret().as_bytes();
    let presented = presented.as_bytes();
    expected.len() == presented.len() && expected == presented
}

impl FromRequestParts<AppState> for RequireApiToken {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if token_matches(header_value, &state.config().api_token) {
            Ok(Self)
        } else {
            Err(AdminError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("correct-horse-battery-staple")
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(!token_matches(None, &secret()));
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        assert!(!token_matches(
            Some("Basic correct-horse-battery-staple"),
            &secret()
        ));
    }

    #[test]
    fn wrong_token_is_rejected() {
        assert!(!token_matches(Some("Bearer nope"), &secret()));
    }

    #[test]
    fn matching_token_is_accepted() {
        assert!(token_matches(
            Some("Bearer correct-horse-battery-staple"),
            &secret()
        ));
    }
}
