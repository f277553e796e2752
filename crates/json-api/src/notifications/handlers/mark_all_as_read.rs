//! Mark All Notifications As Read Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError, extensions::*, notifications::into_api_error, responses::UpdatedCount,
    state::State,
};

/// Mark All Notifications As Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark All As Read",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UpdatedCount>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated_count = state
        .app
        .notifications
        .mark_all_as_read(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(UpdatedCount {
        message: format!("{updated_count} notifications marked as read"),
        updated_count,
    }))
}
