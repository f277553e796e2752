//! Get Delivery Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    deliveries::{DeliveryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Get Delivery Handler
#[endpoint(
    tags("deliveries"),
    summary = "Get Delivery",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<DeliveryResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let delivery = state
        .app
        .deliveries
        .get_delivery(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Delivery retrieved", delivery.into()))
}
