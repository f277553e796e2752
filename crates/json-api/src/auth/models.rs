//! Auth Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::{
    auth::{AuthSession, Credentials, Password, TokenPair},
    domain::users::records::UserRecord,
};

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub is_staff: bool,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            is_staff: user.is_staff,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Access and refresh JWTs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokensResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokensResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
        }
    }
}

/// A signed-in user with fresh tokens.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

impl AuthResponse {
    pub(crate) fn new(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_string(),
            user: session.user.into(),
            tokens: session.tokens.into(),
        }
    }
}

/// Email (or username) and password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CredentialsRequest {
    /// Email address or username
    pub email: String,
    pub password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(request: CredentialsRequest) -> Self {
        Self {
            login: request.email,
            password: Password::new(request.password),
        }
    }
}
