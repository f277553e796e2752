//! Token Refresh Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_api_error, errors::ApiError, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefreshResponse {
    pub message: String,
    pub access: String,
}

/// Token Refresh Handler
#[endpoint(
    tags("auth"),
    summary = "Refresh an access token",
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<RefreshRequest>,
    depot: &mut Depot,
) -> Result<Json<RefreshResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let access = state
        .app
        .auth
        .refresh(&json.into_inner().refresh)
        .await
        .map_err(into_api_error)?;

    Ok(Json(RefreshResponse {
        message: "Token refreshed".to_string(),
        access,
    }))
}
