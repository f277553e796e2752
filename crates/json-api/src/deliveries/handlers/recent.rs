//! Recent Deliveries Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    deliveries::{DeliveryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::ListEnvelope,
    state::State,
};

/// Recent Deliveries Handler
///
/// Deliveries updated in the last 7 days.
#[endpoint(
    tags("deliveries"),
    summary = "Recent Deliveries",
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
        .recent_deliveries(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Recent deliveries retrieved", deliveries))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use larder_app::domain::deliveries::MockDeliveriesService;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    #[tokio::test]
    async fn test_anonymous_caller_returns_401() -> TestResult {
        let mut deliveries = MockDeliveriesService::new();

        deliveries.expect_recent_deliveries().never();

        let service = public_service(
            Mocks {
                deliveries,
                ..Mocks::default()
            },
            Router::with_path("deliveries/recent").get(handler),
        );

        let res = TestClient::get("http://example.com/deliveries/recent")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
