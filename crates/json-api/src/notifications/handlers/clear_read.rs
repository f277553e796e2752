//! Clear Read Notifications Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError, extensions::*, notifications::into_api_error, responses::DeletedCount,
    state::State,
};

/// Clear Read Notifications Handler
///
/// Unread notifications are kept.
#[endpoint(
    tags("notifications"),
    summary = "Clear Read Notifications",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeletedCount>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deleted_count = state
        .app
        .notifications
        .clear_read(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DeletedCount {
        message: format!("{deleted_count} read notifications deleted"),
        deleted_count,
    }))
}
