//! Create Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Create Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    security(("bearer_auth" = [])),
    status_codes(201, 401, 409, 500)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .create_cart(identity.user)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    let cart = CartResponse::try_from(cart).map_err(into_api_error)?;

    Ok(Envelope::json("Cart created", cart))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::carts::{CartsServiceError, MockCartsService, records::CartUuid};

    use crate::{
        errors::ErrorBody,
        test_helpers::{CUSTOMER, Mocks, make_cart, service_as},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            CUSTOMER,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("carts").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_cart_returns_201() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .withf(|user| *user == CUSTOMER.user)
            .return_once(|user| Ok(make_cart(CartUuid::new(), user, Vec::new())));

        let mut res = TestClient::post("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        let body: Envelope<CartResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.data.items.is_empty(), "new carts are empty");

        Ok(())
    }

    #[tokio::test]
    async fn test_second_cart_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.error, "cart_already_exists");

        Ok(())
    }
}
