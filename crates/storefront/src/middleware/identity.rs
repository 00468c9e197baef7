//! Caller identity extractor.
//!
//! Authentication itself is handled by the mobile app's auth layer, which
//! forwards the authenticated user ID in the `x-user-id` header. Routes that
//! need an identity (checkout, order history) extract [`CallerId`]; routes
//! that are purely session-scoped (the cart) do not.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dessert_devs_core::UserId;

use crate::error::AppError;

/// Header carrying the authenticated user ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as asserted by the upstream auth layer.
#[derive(Debug, Clone)]
pub struct CallerId(pub UserId);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(UserId::new(value)))
            .ok_or_else(|| AppError::Unauthorized(format!("missing {USER_ID_HEADER} header")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CallerId, AppError> {
        let (mut parts, ()) = request.into_parts();
        CallerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_user_id_from_header() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "user-42")
            .body(())
            .expect("request");

        let caller = extract(request).await.expect("caller id");
        assert_eq!(caller.0, UserId::new("user-42"));
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let request = Request::builder().body(()).expect("request");
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn blank_header_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "   ")
            .body(())
            .expect("request");
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
