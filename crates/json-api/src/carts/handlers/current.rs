//! Current Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Current Cart Handler
///
/// Serves both `GET /carts` and `GET /carts/current`. `data` is `null` when
/// the caller has no active cart.
#[endpoint(
    tags("carts"),
    summary = "Current Cart",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Option<CartResponse>>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .current_cart(identity.user)
        .await
        .map_err(into_api_error)?;

    let message = if cart.is_some() {
        "Cart retrieved"
    } else {
        "No active cart"
    };

    let cart = cart
        .map(CartResponse::try_from)
        .transpose()
        .map_err(into_api_error)?;

    Ok(Envelope::json(message, cart))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::{
        carts::{MockCartsService, records::CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{CUSTOMER, Mocks, make_cart, make_cart_item, service_as};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            CUSTOMER,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("carts/current").get(handler),
        )
    }

    #[tokio::test]
    async fn test_current_cart_with_items() -> TestResult {
        let cart = CartUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_current_cart()
            .once()
            .withf(|user| *user == CUSTOMER.user)
            .return_once(move |user| {
                Ok(Some(make_cart(
                    cart,
                    user,
                    vec![make_cart_item(cart, ProductUuid::new(), 250, 2)],
                )))
            });

        let mut res = TestClient::get("http://example.com/carts/current")
            .send(&make_service(carts))
            .await;

        let body: Envelope<Option<CartResponse>> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.map(|cart| cart.total_price), Some(500));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_cart_returns_null_data() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_current_cart().once().return_once(|_| Ok(None));

        let mut res = TestClient::get("http://example.com/carts/current")
            .send(&make_service(carts))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.get("message").and_then(serde_json::Value::as_str),
            Some("No active cart")
        );
        assert!(
            body.get("data").is_some_and(serde_json::Value::is_null),
            "data should be null without a cart"
        );

        Ok(())
    }
}
