//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use larder_app::domain::orders::data::OrderStatusUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, OrderStatusRequest, into_api_error},
    responses::Envelope,
    state::State,
};

/// Update Order Status Handler
///
/// Moves any customer's order along the lifecycle. The change is recorded in
/// the order history under the calling staff member.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = OrderStatusUpdate::try_from(json.into_inner())?;
    let status = update.status;

    let order = state
        .app
        .orders
        .update_status(identity.user, uuid.into_inner().into(), update)
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_uuid = %order.uuid, %status, "changed order status");

    Ok(Envelope::json("Order status updated", order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        lifecycle::{InvalidTransition, OrderStatus},
        records::OrderUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{CUSTOMER, Mocks, STAFF, make_order, service_as},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_as(
            STAFF,
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{uuid}/status").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_staff_ships_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |actor, order, update| {
                *actor == STAFF.user
                    && *order == uuid
                    && update.status == OrderStatus::Shipped
                    && update.comment.as_deref() == Some("Left the warehouse")
            })
            .return_once(|_, order, _| Ok(make_order(order, CUSTOMER.user, OrderStatus::Shipped)));

        let mut res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "shipped", "comment": "Left the warehouse" }))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "shipped");
        assert_eq!(body.data.user_uuid, CUSTOMER.user.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_illegal_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition(InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            }))
        });

        let mut res =
            TestClient::patch(format!("http://example.com/orders/{}/status", OrderUuid::new()))
                .json(&json!({ "status": "pending" }))
                .send(&make_service(orders))
                .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "invalid_transition");
        assert_eq!(
            body.details,
            vec!["cannot move an order from delivered to pending".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_never_reaches_service() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let mut res =
            TestClient::patch(format!("http://example.com/orders/{}/status", OrderUuid::new()))
                .json(&json!({ "status": "teleported" }))
                .send(&make_service(orders))
                .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "invalid_status");

        Ok(())
    }
}
