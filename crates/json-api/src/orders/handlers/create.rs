//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use larder_app::domain::orders::records::OrderUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderRequest, OrderResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Create Order Handler
///
/// Checks out the caller's active cart.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    status_codes(201, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<OrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_order = json.into_inner().into_new(OrderUuid::new())?;

    let order = state
        .app
        .orders
        .create_order(identity.user, new_order)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        order_uuid = %order.uuid,
        order_number = %order.order_number,
        total_amount = order.total_amount,
        "created order"
    );

    Ok(Envelope::json("Order created", order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::{
        carts::records::CartUuid,
        orders::{
            MockOrdersService, OrdersServiceError, data::AddressError, lifecycle::OrderStatus,
            records::PaymentMethod,
        },
        products::records::ProductUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{CUSTOMER, Mocks, make_order, service_as},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_as(
            CUSTOMER,
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders").post(handler),
        )
    }

    fn payload(cart: CartUuid) -> serde_json::Value {
        json!({
            "cart_id": cart.into_uuid(),
            "payment_method": "paypal",
            "delivery_address": "12 rue des Lilas",
            "delivery_city": "Lyon",
            "delivery_postal_code": "69001",
            "delivery_phone": "0601020304",
            "shipping_cost": 500,
        })
    }

    #[tokio::test]
    async fn test_checkout_returns_201() -> TestResult {
        let cart = CartUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |user, order| {
                *user == CUSTOMER.user
                    && order.cart == cart
                    && order.payment_method == PaymentMethod::Paypal
                    && order.delivery.country == "France"
                    && order.shipping_cost == 500
            })
            .return_once(|user, order| Ok(make_order(order.uuid, user, OrderStatus::Pending)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&payload(cart))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{}", body.data.uuid).as_str()));
        assert_eq!(body.data.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_short_address_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidDeliveryAddress(AddressError::Address))
        });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&payload(CartUuid::new()))
            .send(&make_service(orders))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "invalid_delivery_address");

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_shortage_names_the_product() -> TestResult {
        let product = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().return_once(move |_, _| {
            Err(OrdersServiceError::InsufficientStock {
                product,
                available: 1,
            })
        });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&payload(CartUuid::new()))
            .send(&make_service(orders))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "insufficient_stock");
        assert_eq!(
            body.details,
            vec![format!("product: {product}"), "available: 1".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::CartEmpty));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&payload(CartUuid::new()))
            .send(&make_service(orders))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "cart_empty");

        Ok(())
    }
}
