//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError, extensions::*, products::into_api_error, responses::MessageResponse,
    state::State,
};

/// Delete Product Handler
///
/// Soft-deletes the product. Existing order lines keep their copy.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();

    state
        .app
        .products
        .delete_product(uuid.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %uuid, "deleted product");

    Ok(MessageResponse::json("Product deleted"))
}
