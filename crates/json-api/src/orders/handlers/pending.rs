//! Pending Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Pending Orders Handler
#[endpoint(
    tags("orders"),
    summary = "Pending Orders",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .pending_orders(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Pending orders retrieved", orders))
}
