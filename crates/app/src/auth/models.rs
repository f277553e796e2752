//! Auth data models.

use crate::{
    auth::{Password, TokenPair},
    domain::users::records::{UserRecord, UserUuid},
};

/// The authenticated caller, resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub is_staff: bool,
}

/// Self-service account registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: Password,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Login by email or username.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: Password,
}

/// A signed-in user with a fresh token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserRecord,
    pub tokens: TokenPair,
}

const MAX_USERNAME_LENGTH: usize = 150;

pub(crate) fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    let username = username.trim();

    !username.is_empty()
        && username.chars().count() <= MAX_USERNAME_LENGTH
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}
