//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Get Order Handler
///
/// Orders belonging to someone else are reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Order retrieved", order.into()))
}
