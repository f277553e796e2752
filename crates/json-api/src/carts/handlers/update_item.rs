//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::carts::data::CartItemUpdate;

use crate::{
    carts::{CartItemChangeResponse, into_api_error, parse_quantity},
    errors::ApiError,
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    pub item_id: Uuid,
    /// New absolute quantity
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Item",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemChangeResponse>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let update = CartItemUpdate {
        item: request.item_id.into(),
        quantity: parse_quantity(request.quantity)?,
    };

    let change = state
        .app
        .carts
        .update_item(identity.user, update)
        .await
        .map_err(into_api_error)?;

    CartItemChangeResponse::new("Quantity updated", change)
        .map(Json)
        .map_err(into_api_error)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            data::CartItemChange,
            records::{CartItemUuid, CartUuid},
        },
        products::records::ProductUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{CUSTOMER, Mocks, make_cart, make_cart_item, service_as},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            CUSTOMER,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("carts/update_item").put(handler),
        )
    }

    #[tokio::test]
    async fn test_sets_absolute_quantity() -> TestResult {
        let cart = CartUuid::new();
        let line = make_cart_item(cart, ProductUuid::new(), 100, 4);
        let item = line.uuid;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |_, update| update.item == item && update.quantity == 4)
            .return_once(move |user, _| {
                Ok(CartItemChange {
                    item: line.clone(),
                    cart: make_cart(cart, user, vec![line]),
                })
            });

        let mut res = TestClient::put("http://example.com/carts/update_item")
            .json(&json!({ "item_id": item.into_uuid(), "quantity": 4 }))
            .send(&make_service(carts))
            .await;

        let body: CartItemChangeResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.item.total_price, 400);
        assert_eq!(body.cart.total_items, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let mut res = TestClient::put("http://example.com/carts/update_item")
            .json(&json!({ "item_id": CartItemUuid::new().into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "cart_item_not_found");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_quantity_is_rejected() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_item().never();

        let res = TestClient::put("http://example.com/carts/update_item")
            .json(&json!({ "item_id": CartItemUuid::new().into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
