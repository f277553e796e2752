//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every line but keeps the cart active.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .clear_cart(identity.user)
        .await
        .map_err(into_api_error)?;

    let cart = CartResponse::try_from(cart).map_err(into_api_error)?;

    Ok(Envelope::json("Cart cleared", cart))
}
