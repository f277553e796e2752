//! Available Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Available Products Handler
///
/// Products that can be bought right now: available and in stock.
#[endpoint(tags("products"), summary = "Available Products", status_codes(200, 500))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .available_products()
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Available products retrieved", products))
}
