//! Auth service errors.

use thiserror::Error;

use crate::auth::{PasswordHashError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid login or password")]
    InvalidCredentials,

    #[error("token is invalid or expired")]
    InvalidToken,

    #[error("a user with this email or username already exists")]
    AlreadyExists,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("username is not valid")]
    InvalidUsername,

    #[error("password must be at least {min} characters long", min = crate::auth::MIN_PASSWORD_LENGTH)]
    WeakPassword,

    #[error(transparent)]
    Password(#[from] PasswordHashError),

    #[error("token error")]
    Token(#[source] TokenError),

    #[error("database error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid(_) | TokenError::WrongKind { .. } => Self::InvalidToken,
            other => Self::Token(other),
        }
    }
}
