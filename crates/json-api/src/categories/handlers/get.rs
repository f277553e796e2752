//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::{CategoryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Get Category Handler
#[endpoint(tags("categories"), summary = "Get Category", status_codes(200, 404, 500))]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(&slug.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Category retrieved", category.into()))
}
