//! Session cookies: a signed JWT in an HttpOnly cookie.
//!
//! Deliberately thin plumbing. The core services never see any of this;
//! they take the acting user as an explicit parameter, and the route
//! handlers resolve that parameter from the cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use credo_core::UserId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Missing session token")]
    MissingToken,
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Mints and validates the session cookie.
#[derive(Clone)]
pub struct SessionScheme {
    jwt_secret: Secret<String>,
    cookie_name: String,
    time_to_live_seconds: i64,
}

impl SessionScheme {
    pub fn new(
        jwt_secret: Secret<String>,
        cookie_name: impl Into<String>,
        time_to_live_seconds: i64,
    ) -> Self {
        Self {
            jwt_secret,
            cookie_name: cookie_name.into(),
            time_to_live_seconds,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Issue a fresh session cookie for the given account.
    pub fn issue_cookie(&self, user_id: &UserId) -> Result<Cookie<'static>, SessionError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.time_to_live_seconds,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| SessionError::UnexpectedError(e.to_string()))?;

        Ok(Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build())
    }

    /// The cookie to hand to `CookieJar::remove` on logout.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .http_only(true)
            .build()
    }

    /// Resolve the acting user from the request's cookies.
    pub fn authenticate(&self, jar: &CookieJar) -> Result<UserId, SessionError> {
        let cookie = jar.get(&self.cookie_name).ok_or(SessionError::MissingToken)?;

        let data = decode::<SessionClaims>(
            cookie.value(),
            &DecodingKey::from_secret(self.jwt_secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| SessionError::InvalidToken)?;

        data.claims
            .sub
            .parse()
            .map_err(|_| SessionError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> SessionScheme {
        SessionScheme::new(Secret::from("test-secret".to_string()), "credo_session", 3600)
    }

    #[test]
    fn issued_cookie_authenticates() {
        let scheme = scheme();
        let user_id = UserId::new();

        let jar = CookieJar::new().add(scheme.issue_cookie(&user_id).unwrap());
        assert_eq!(scheme.authenticate(&jar).unwrap(), user_id);
    }

    #[test]
    fn missing_cookie_is_rejected() {
        let result = scheme().authenticate(&CookieJar::new());
        assert!(matches!(result, Err(SessionError::MissingToken)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let scheme = scheme();
        let mut cookie = scheme.issue_cookie(&UserId::new()).unwrap();
        let mut value = cookie.value().to_string();
        value.push('x');
        cookie.set_value(value);

        let jar = CookieJar::new().add(cookie);
        assert!(matches!(
            scheme.authenticate(&jar),
            Err(SessionError::InvalidToken)
        ));
    }

    #[test]
    fn a_cookie_signed_with_another_secret_is_rejected() {
        let other =
            SessionScheme::new(Secret::from("other-secret".to_string()), "credo_session", 3600);
        let jar = CookieJar::new().add(other.issue_cookie(&UserId::new()).unwrap());
        assert!(matches!(
            scheme().authenticate(&jar),
            Err(SessionError::InvalidToken)
        ));
    }
}
