//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use larder_app::domain::categories::data::CategoryFilter;

use crate::{
    categories::{CategoryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::ListEnvelope,
    state::State,
};

/// Category Index Handler
///
/// `search` matches name or slug. `ordering` takes `name` or `created_at`,
/// prefixed with `-` for descending order.
#[endpoint(tags("categories"), summary = "List Categories", status_codes(200, 400, 500))]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut filter = CategoryFilter {
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
        ..CategoryFilter::default()
    };

    if let Some(ordering) = ordering.into_inner() {
        filter.sort = ordering
            .parse()
            .or_400("invalid_ordering", "Unsupported ordering")?;
    }

    let categories = state
        .app
        .categories
        .list_categories(filter)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Categories retrieved", categories))
}
