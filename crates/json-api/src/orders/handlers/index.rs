//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use larder_app::domain::orders::{
    data::OrderFilter, lifecycle::OrderStatus, records::PaymentMethod,
};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, into_api_error},
    responses::ListEnvelope,
    state::State,
};

/// Order Index Handler
///
/// The caller's orders. `ordering` takes `created_at`, `total_amount` or
/// `order_number`, prefixed with `-` for descending order.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 500)
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    payment_method: QueryParam<String, false>,
    payment_status: QueryParam<bool, false>,
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<OrderResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut filter = OrderFilter {
        status: status
            .into_inner()
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()
            .or_400("invalid_status", "Unknown order status")?,
        payment_method: payment_method
            .into_inner()
            .as_deref()
            .map(str::parse::<PaymentMethod>)
            .transpose()
            .or_400("invalid_payment_method", "Unknown payment method")?,
        payment_status: payment_status.into_inner(),
        ..OrderFilter::default()
    };

    if let Some(ordering) = ordering.into_inner() {
        filter.sort = ordering
            .parse()
            .or_400("invalid_ordering", "Unsupported ordering")?;
    }

    let orders = state
        .app
        .orders
        .list_orders(identity.user, filter)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Orders retrieved", orders))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::{
        orders::{MockOrdersService, data::OrderSortField, records::OrderUuid},
        sorting::Sort,
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
            Router::with_path("orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_filters_are_forwarded() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|user, filter| {
                *user == CUSTOMER.user
                    && filter.status == Some(OrderStatus::Confirmed)
                    && filter.payment_method == Some(PaymentMethod::Paypal)
                    && filter.payment_status == Some(false)
                    && filter.sort == Sort::ascending(OrderSortField::TotalAmount)
            })
            .return_once(|user, _| {
                Ok(vec![make_order(OrderUuid::new(), user, OrderStatus::Confirmed)])
            });

        let mut res = TestClient::get(
            "http://example.com/orders?status=confirmed&payment_method=paypal&payment_status=false&ordering=total_amount",
        )
        .send(&make_service(orders))
        .await;

        let body: ListEnvelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let mut res = TestClient::get("http://example.com/orders?status=lost")
            .send(&make_service(orders))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "invalid_status");

        Ok(())
    }
}
