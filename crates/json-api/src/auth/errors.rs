//! Auth Errors

use salvo::http::StatusCode;
use tracing::error;

use larder_app::auth::AuthServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::new(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Unable to log in with the provided credentials",
        ),
        AuthServiceError::InvalidToken => ApiError::new(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "Token is invalid or expired",
        ),
        AuthServiceError::AlreadyExists => ApiError::conflict(
            "user_already_exists",
            "A user with this email or username already exists",
        ),
        AuthServiceError::InvalidEmail => {
            ApiError::bad_request("invalid_email", "Enter a valid email address").with_detail("email")
        }
        AuthServiceError::InvalidUsername => ApiError::bad_request(
            "invalid_username",
            "Usernames may only contain letters, digits and @.+-_",
        )
        .with_detail("username"),
        error @ AuthServiceError::WeakPassword => {
            ApiError::bad_request("weak_password", error.to_string()).with_detail("password")
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            ApiError::internal()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process token: {source}");

            ApiError::internal()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            ApiError::internal()
        }
    }
}
