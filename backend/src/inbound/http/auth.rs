//! Bearer-credential gate for the admin endpoints.
//!
//! The check is stateless: every protected request must carry
//! `Authorization: Bearer <secret>` matching the configured admin secret.
//! There is no login endpoint; the dashboard proves a candidate secret by
//! calling the list endpoint and watching for a 401.

use actix_web::http::header;
use actix_web::HttpRequest;

use crate::domain::{AdminSecret, DomainError};

use super::ApiResult;

/// Reject the request unless it carries the admin bearer credential.
///
/// Absent header, non-bearer scheme, and wrong secret are indistinguishable
/// to the caller.
pub fn require_admin(req: &HttpRequest, secret: &AdminSecret) -> ApiResult<()> {
    let candidate = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match candidate {
        Some(candidate) if secret.matches(candidate) => Ok(()),
        _ => Err(DomainError::unauthorized("Unauthorized").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn secret() -> AdminSecret {
        AdminSecret::new("letmein").expect("valid secret")
    }

    #[rstest]
    fn accepts_the_configured_secret() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer letmein"))
            .to_http_request();
        assert!(require_admin(&req, &secret()).is_ok());
    }

    #[rstest]
    #[case::missing_header(None)]
    #[case::wrong_scheme(Some("Basic letmein"))]
    #[case::wrong_secret(Some("Bearer password"))]
    #[case::lowercase_scheme(Some("bearer letmein"))]
    #[case::trailing_garbage(Some("Bearer letmein "))]
    fn rejects_bad_credentials(#[case] header_value: Option<&str>) {
        let mut req = TestRequest::default();
        if let Some(value) = header_value {
            req = req.insert_header(("Authorization", value));
        }
        let err = require_admin(&req.to_http_request(), &secret()).expect_err("should reject");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
