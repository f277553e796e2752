//! Login Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    auth::{AuthResponse, CredentialsRequest, into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Login Handler
///
/// The `email` field also accepts a username.
#[endpoint(tags("auth"), summary = "Log in", status_codes(200, 401, 500))]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(AuthResponse::new("Login successful", session)))
}
