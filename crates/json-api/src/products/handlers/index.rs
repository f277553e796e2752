//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use larder_app::domain::products::data::ProductFilter;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Product Index Handler
///
/// Lists live products. `ordering` takes `name`, `price`, `stock` or
/// `created_at`, prefixed with `-` for descending order.
#[endpoint(tags("products"), summary = "List Products", status_codes(200, 400, 500))]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    is_available: QueryParam<bool, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    in_stock: QueryParam<bool, false>,
    search: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut filter = ProductFilter {
        category: category.into_inner().map(Into::into),
        is_available: is_available.into_inner(),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        in_stock: in_stock.into_inner().unwrap_or(false),
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
        ..ProductFilter::default()
    };

    if let Some(ordering) = ordering.into_inner() {
        filter.sort = ordering
            .parse()
            .or_400("invalid_ordering", "Unsupported ordering")?;
    }

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Products retrieved", products))
}
