//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use larder_app::auth::{Password, Registration};

use crate::{
    auth::{AuthResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email,
            username: request.username,
            password: Password::new(request.password),
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        }
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Create an account",
    status_codes(201, 400, 409, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(user_uuid = %session.user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(AuthResponse::new("Registration successful", session)))
}
