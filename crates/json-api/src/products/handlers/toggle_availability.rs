//! Toggle Availability Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Toggle Availability Handler
#[endpoint(
    tags("products"),
    summary = "Toggle Availability",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .toggle_availability(uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    let message = if product.is_available {
        "Product is now available"
    } else {
        "Product is now unavailable"
    };

    Ok(Envelope::json(message, product.into()))
}
