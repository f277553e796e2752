//! Delivery Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    deliveries::{DeliveryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::ListEnvelope,
    state::State,
};

/// Delivery Index Handler
///
/// Deliveries of the caller's orders.
#[endpoint(
    tags("deliveries"),
    summary = "List Deliveries",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<DeliveryResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deliveries = state
        .app
        .deliveries
        .list_deliveries(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Deliveries retrieved", deliveries))
}
