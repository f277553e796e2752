//! JWT access and refresh tokens.

use std::fmt;

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Default access token lifetime.
pub const DEFAULT_ACCESS_TTL_SECONDS: u64 = 60 * 60;

/// Default refresh token lifetime.
pub const DEFAULT_REFRESH_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub kind: TokenKind,
    pub staff: bool,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    #[must_use]
    pub fn user(&self) -> UserUuid {
        UserUuid::from_uuid(self.sub)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signing secret and lifetimes.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_ttl_seconds: u64,
    pub refresh_ttl_seconds: u64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"**redacted**")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl Drop for JwtSettings {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt secret must not be empty")]
    EmptySecret,

    #[error("token lifetime is out of range")]
    InvalidLifetime,

    #[error("token could not be encoded")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("expected a {expected:?} token")]
    WrongKind { expected: TokenKind },
}

/// Issues and verifies HS256 tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret is blank or a lifetime does not fit in
    /// a signed timestamp.
    pub fn new(settings: &JwtSettings) -> Result<Self, TokenError> {
        if settings.secret.trim().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let access_ttl_seconds = i64::try_from(settings.access_ttl_seconds)
            .map_err(|_overflow| TokenError::InvalidLifetime)?;
        let refresh_ttl_seconds = i64::try_from(settings.refresh_ttl_seconds)
            .map_err(|_overflow| TokenError::InvalidLifetime)?;

        Ok(Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }

    /// Issue an access/refresh pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either token cannot be encoded.
    pub fn issue_pair(&self, user: UserUuid, staff: bool) -> Result<TokenPair, TokenError> {
        let now = Timestamp::now();

        Ok(TokenPair {
            access: self.issue_at(user, staff, TokenKind::Access, now)?,
            refresh: self.issue_at(user, staff, TokenKind::Refresh, now)?,
        })
    }

    /// Issue a single access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded.
    pub fn issue_access(&self, user: UserUuid, staff: bool) -> Result<String, TokenError> {
        self.issue_at(user, staff, TokenKind::Access, Timestamp::now())
    }

    fn issue_at(
        &self,
        user: UserUuid,
        staff: bool,
        kind: TokenKind,
        now: Timestamp,
    ) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        };

        let iat = now.as_second();

        let claims = Claims {
            sub: user.into_uuid(),
            kind,
            staff,
            iat,
            exp: iat.saturating_add(ttl),
            jti: Uuid::now_v7(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Verify signature and expiry, and require the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed, tampered, expired or wrong-kind token.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(TokenError::Invalid)?
            .claims;

        if claims.kind != expected {
            return Err(TokenError::WrongKind { expected });
        }

        Ok(claims)
    }
}
