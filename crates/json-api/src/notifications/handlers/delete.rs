//! Delete Notification Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError, extensions::*, notifications::into_api_error, responses::MessageResponse,
    state::State,
};

/// Delete Notification Handler
#[endpoint(
    tags("notifications"),
    summary = "Delete Notification",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .notifications
        .delete_notification(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(MessageResponse::json("Notification deleted"))
}
