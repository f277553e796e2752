//! Get Notification Handler

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

/// Get Notification Handler
///
/// Another user's notification answers 404.
#[endpoint(
    tags("notifications"),
    summary = "Get Notification",
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
        .get_notification(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Notification retrieved", notification.into()))
}
