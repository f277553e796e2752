//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::error;

use crate::errors::ApiError;

pub(crate) trait ResultExt<T> {
    /// Map any error to a logged internal server error.
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    /// Map any error to a bad request with the given code.
    fn or_400(self, code: &'static str, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::internal()
        })
    }

    fn or_400(self, code: &'static str, message: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::bad_request(code, message).with_detail(error.to_string()))
    }
}
