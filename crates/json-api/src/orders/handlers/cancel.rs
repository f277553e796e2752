//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Cancel Order Handler
///
/// Allowed until the order ships. The ordered units go back into stock.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .cancel_order(identity.user, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_uuid = %order.uuid, "cancelled order");

    Ok(Envelope::json("Order cancelled", order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::orders::{
        MockOrdersService, OrdersServiceError, lifecycle::OrderStatus, records::OrderUuid,
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
            Router::with_path("orders/{uuid}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_confirmed_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .withf(move |_, order| *order == uuid)
            .return_once(|user, order| Ok(make_order(order, user, OrderStatus::Cancelled)));

        let mut res = TestClient::post(format!("http://example.com/orders/{uuid}/cancel"))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_shipped_order_cannot_be_cancelled() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::CannotBeCancelled));

        let mut res =
            TestClient::post(format!("http://example.com/orders/{}/cancel", OrderUuid::new()))
                .send(&make_service(orders))
                .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "cannot_be_cancelled");

        Ok(())
    }
}
