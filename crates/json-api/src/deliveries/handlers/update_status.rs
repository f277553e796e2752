//! Update Delivery Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use larder_app::domain::deliveries::data::DeliveryStatusUpdate;

use crate::{
    deliveries::{DeliveryResponse, DeliveryStatusRequest, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Update Delivery Status Handler
///
/// Notifies the customer and nudges the order: `on_the_way` moves a confirmed
/// order to processing, `delivered` completes a processing or shipped order.
#[endpoint(
    tags("deliveries"),
    summary = "Update Delivery Status",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<DeliveryStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<DeliveryResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = DeliveryStatusUpdate::try_from(json.into_inner())?;

    let delivery = state
        .app
        .deliveries
        .update_status(identity.user, uuid.into_inner().into(), update)
        .await
        .map_err(into_api_error)?;

    let message = format!("Delivery status updated to \"{}\"", delivery.status.label());

    Ok(Envelope::json(message, delivery.into()))
}
