//! Unread Notifications Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{NotificationResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Unread Notifications Handler
///
/// Notifications not yet marked as read.
#[endpoint(
    tags("notifications"),
    summary = "Unread Notifications",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<NotificationResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let notifications = state
        .app
        .notifications
        .unread_notifications(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Unread notifications retrieved", notifications))
}
