//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{CartItemChangeResponse, into_api_error, parse_quantity},
    errors::ApiError,
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_id: Uuid,
    #[serde(default = "one")]
    pub quantity: i64,
}

const fn one() -> i64 {
    1
}

/// Add Cart Item Handler
///
/// Opens a cart when the caller has none. Adding a product that is already in
/// the cart sums the quantities.
#[endpoint(
    tags("carts"),
    summary = "Add Item",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemChangeResponse>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let item = NewCartItem {
        product: request.product_id.into(),
        quantity: parse_quantity(request.quantity)?,
    };

    let change = state
        .app
        .carts
        .add_item(identity.user, item)
        .await
        .map_err(into_api_error)?;

    CartItemChangeResponse::new("Item added to cart", change)
        .map(Json)
        .map_err(into_api_error)
}
