//! Mark Notification As Read Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{NotificationResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Mark Notification As Read Handler
///
/// Marking an already read notification is not an error.
#[endpoint(
    tags("notifications"),
    summary = "Mark As Read",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<NotificationResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let notification = state
        .app
        .notifications
        .mark_as_read(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Notification marked as read", notification.into()))
}
