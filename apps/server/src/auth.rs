//! Authentication primitives for the admin back-office.
//!
//! The public catalog and search endpoints are open; everything under
//! `/api/admin` requires a signed HS256 session token, presented either as
//! an `Authorization: Bearer ...` header or an `admin_session` cookie.

use crate::{config::AuthConfig, state::AppState, Error, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "admin_session";

const LOGIN_REQUIRED: &str = "Unauthorized - Please login";

fn unauthorized() -> Error {
    Error::Unauthorized(LOGIN_REQUIRED.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user identifier.
    pub sub: String,
    /// Expiry, seconds since epoch.
    pub exp: u64,
}

/// The authenticated admin attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub subject: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// Validate the session token on a request, if any.
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<CurrentUser> {
    let token = bearer_token(headers)
        .or_else(|| cookie_token(headers))
        .ok_or_else(unauthorized)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.token_leeway_seconds;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|err| {
        tracing::debug!(error = %err, "Rejected admin token");
        unauthorized()
    })?;

    Ok(CurrentUser {
        subject: data.claims.sub,
    })
}

/// Gate for the admin router: rejects the request before any handler runs.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let user = authenticate(request.headers(), &state.config.auth)?;
    tracing::debug!(subject = %user.subject, "Admin request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            token_leeway_seconds: 30,
        }
    }

    fn token(secret: &str) -> String {
        let claims = Claims {
            sub: "admin".into(),
            exp: jsonwebtoken::get_current_timestamp() + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_bearer_header() {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", token("test-secret"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        let user = authenticate(&headers, &config()).unwrap();
        assert_eq!(user.subject, "admin");
    }

    #[test]
    fn accepts_session_cookie() {
        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; {SESSION_COOKIE}={}", token("test-secret"));
        headers.insert(header::COOKIE, HeaderValue::from_str(&value).unwrap());
        assert!(authenticate(&headers, &config()).is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", token("other-secret"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        assert!(matches!(
            authenticate(&headers, &config()),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_missing_token() {
        let headers = HeaderMap::new();
        assert!(matches!(
            authenticate(&headers, &config()),
            Err(Error::Unauthorized(_))
        ));
    }
}
