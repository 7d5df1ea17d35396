//! Bearer-token guard for back-office routes.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use log::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Extractor that requires `Authorization: Bearer <ADMIN_TOKEN>`.
///
/// ```rust,ignore
/// async fn delete_thing(_admin: AdminAuth, ...) -> Result<HttpResponse, AppError> {
///     ...
/// }
/// ```
pub struct AdminAuth;

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim())
}

/// Compares without returning early on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn authorize(req: &HttpRequest) -> Result<AdminAuth, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not registered".into()))?;

    match bearer_token(req) {
        Some(token) if !token.is_empty() && tokens_match(token, &state.admin_token) => {
            Ok(AdminAuth)
        }
        Some(_) => {
            warn!("rejected admin token on {} {}", req.method(), req.path());
            Err(AppError::Unauthorized)
        }
        None => {
            warn!("missing admin token on {} {}", req.method(), req.path());
            Err(AppError::Unauthorized)
        }
    }
}

impl FromRequest for AdminAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc"));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn token_comparison() {
        assert!(tokens_match("s3cr3t", "s3cr3t"));
        assert!(!tokens_match("s3cr3T", "s3cr3t"));
        assert!(!tokens_match("s3cr3", "s3cr3t"));
    }
}
