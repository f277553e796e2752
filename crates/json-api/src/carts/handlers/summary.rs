//! Cart Summary Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartSummaryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Cart Summary Handler
///
/// All totals are zero when the caller has no active cart.
#[endpoint(
    tags("carts"),
    summary = "Cart Summary",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<CartSummaryResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let summary = state
        .app
        .carts
        .summary(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Cart summary retrieved", summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::carts::{MockCartsService, records::CartSummary};

    use crate::test_helpers::{CUSTOMER, Mocks, service_as};

    use super::*;

    #[tokio::test]
    async fn test_summary_totals() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_summary().once().return_once(|_| {
            Ok(CartSummary {
                total_items: 3,
                items_count: 2,
                total_price: 600,
                total_price_with_tax: 720,
            })
        });

        let service = service_as(
            CUSTOMER,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("carts/summary").get(handler),
        );

        let mut res = TestClient::get("http://example.com/carts/summary")
            .send(&service)
            .await;

        let body: Envelope<CartSummaryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.total_items, 3);
        assert_eq!(body.data.total_price_with_tax, 720);

        Ok(())
    }
}
