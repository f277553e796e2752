//! Create Delivery Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use larder_app::domain::deliveries::{data::NewDelivery, records::DeliveryUuid};

use crate::{
    deliveries::{DeliveryRequest, DeliveryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Create Delivery Handler
///
/// Starts tracking an order in preparation. One delivery per order.
#[endpoint(
    tags("deliveries"),
    summary = "Create Delivery",
    security(("bearer_auth" = [])),
    status_codes(201, 400, 401, 403, 404, 409, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<DeliveryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<DeliveryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_delivery = NewDelivery {
        uuid: DeliveryUuid::new(),
        order: json.into_inner().order_id.into(),
    };

    let delivery = state
        .app
        .deliveries
        .create_delivery(new_delivery)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/deliveries/{}", delivery.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::json("Delivery created", delivery.into()))
}
