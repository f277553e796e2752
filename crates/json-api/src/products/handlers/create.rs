//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use larder_app::domain::products::records::ProductUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductRequest, ProductResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    status_codes(201, 400, 401, 403, 409, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_product = json.into_inner().into_new(ProductUuid::new())?;

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, slug = %product.slug, "created product");

    Ok(Envelope::json("Product created", product.into()))
}
