//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::into_api_error, errors::ApiError, extensions::*, responses::MessageResponse,
    state::State,
};

/// Delete Category Handler
///
/// Refused while any live product is filed under the category.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let slug = slug.into_inner();

    state
        .app
        .categories
        .delete_category(&slug)
        .await
        .map_err(into_api_error)?;

    tracing::info!(%slug, "deleted category");

    Ok(MessageResponse::json("Category deleted"))
}
