//! Token Obtain Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{CredentialsRequest, UserResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Token pair with the user it was issued to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenObtainResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserResponse,
}

/// Token Obtain Handler
#[endpoint(
    tags("auth"),
    summary = "Obtain a JWT pair",
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenObtainResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(TokenObtainResponse {
        access: session.tokens.access,
        refresh: session.tokens.refresh,
        user: session.user.into(),
    }))
}
