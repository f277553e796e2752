//! Active Deliveries Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    deliveries::{DeliveryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::ListEnvelope,
    state::State,
};

/// Active Deliveries Handler
///
/// Deliveries that have not arrived yet.
#[endpoint(
    tags("deliveries"),
    summary = "Active Deliveries",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<DeliveryResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deliveries = state
        .app
        .deliveries
        .active_deliveries(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Active deliveries retrieved", deliveries))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::deliveries::{
        MockDeliveriesService,
        records::{DeliveryStatus, DeliveryUuid},
    };

    use crate::test_helpers::{CUSTOMER, Mocks, make_delivery, service_as};

    use super::*;

    #[tokio::test]
    async fn test_active_deliveries() -> TestResult {
        let mut deliveries = MockDeliveriesService::new();

        deliveries.expect_active_deliveries().once().return_once(|_| {
            Ok(vec![
                make_delivery(DeliveryUuid::new(), DeliveryStatus::Preparation),
                make_delivery(DeliveryUuid::new(), DeliveryStatus::OnTheWay),
            ])
        });

        let service = service_as(
            CUSTOMER,
            Mocks {
                deliveries,
                ..Mocks::default()
            },
            Router::with_path("deliveries/active").get(handler),
        );

        let mut res = TestClient::get("http://example.com/deliveries/active")
            .send(&service)
            .await;

        let body: ListEnvelope<DeliveryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 2);
        assert!(body.data.iter().all(|delivery| delivery.is_active));

        Ok(())
    }
}
