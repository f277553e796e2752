//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, AuthSession, Credentials, Identity, Registration, TokenIssuer, TokenKind,
        hash_password, is_valid_email, is_valid_username, verify_password,
    },
    database::Db,
    domain::users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    tokens: Arc<TokenIssuer>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            tokens: Arc::new(tokens),
        }
    }

    /// Create a user account without signing it in. Staff accounts can only be
    /// created this way.
    ///
    /// # Errors
    ///
    /// Returns an error when the registration is invalid, the email or
    /// username is taken, or the database insert fails.
    pub async fn create_user(
        &self,
        registration: Registration,
        is_staff: bool,
    ) -> Result<UserRecord, AuthServiceError> {
        if !is_valid_email(&registration.email) {
            return Err(AuthServiceError::InvalidEmail);
        }

        if !is_valid_username(&registration.username) {
            return Err(AuthServiceError::InvalidUsername);
        }

        if !registration.password.is_strong_enough() {
            return Err(AuthServiceError::WeakPassword);
        }

        let password_hash = hash_password(&registration.password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    uuid: UserUuid::new(),
                    email: registration.email,
                    username: registration.username,
                    first_name: registration.first_name,
                    last_name: registration.last_name,
                    phone: registration.phone,
                    password_hash,
                    is_staff,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, is_staff, "created user");

        Ok(user)
    }

    fn session(&self, user: UserRecord) -> Result<AuthSession, AuthServiceError> {
        let tokens = self.tokens.issue_pair(user.uuid, user.is_staff)?;

        Ok(AuthSession { user, tokens })
    }

    async fn active_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users.find_user(&mut tx, user).await?;

        tx.commit().await?;

        user.filter(|user| user.is_active)
            .ok_or(AuthServiceError::InvalidToken)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer account and sign it in.
    async fn register(&self, registration: Registration)
    -> Result<AuthSession, AuthServiceError>;

    /// Sign in with email or username and a password.
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthServiceError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthServiceError>;

    /// Resolve an access token to the active user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Identity, AuthServiceError>;

    /// The signed-in user's account.
    async fn current_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError>;
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthSession, AuthServiceError> {
        let user = self.create_user(registration, false).await?;

        self.session(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.users.find_credentials(&mut tx, &credentials.login).await?;

        tx.commit().await?;

        let Some(found) = found else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !found.user.is_active || !verify_password(&credentials.password, &found.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.session(found.user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthServiceError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;

        let user = self.active_user(claims.user()).await?;

        Ok(self.tokens.issue_access(user.uuid, user.is_staff)?)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<Identity, AuthServiceError> {
        let claims = self.tokens.verify(bearer_token, TokenKind::Access)?;

        // Staff status comes from the row, so a demotion applies to live tokens.
        let user = self.active_user(claims.user()).await?;

        Ok(Identity {
            user: user.uuid,
            is_staff: user.is_staff,
        })
    }

    async fn current_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        self.active_user(user).await
    }
}
