//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{CartResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveItemRequest {
    pub item_id: Uuid,
}

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveItemRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .remove_item(identity.user, json.into_inner().item_id.into())
        .await
        .map_err(into_api_error)?;

    let cart = CartResponse::try_from(cart).map_err(into_api_error)?;

    Ok(Envelope::json("Item removed from cart", cart))
}
