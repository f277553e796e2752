//! Low Stock Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use larder_app::domain::products::data::DEFAULT_LOW_STOCK_THRESHOLD;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Low Stock Products Handler
///
/// Products at or below `threshold` units, lowest stock first.
#[endpoint(tags("products"), summary = "Low Stock Products", status_codes(200, 400, 500))]
pub(crate) async fn handler(
    threshold: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let threshold = threshold
        .into_inner()
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let products = state
        .app
        .products
        .low_stock_products(threshold)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Low stock products retrieved", products))
}
