//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Get Product Handler
#[endpoint(tags("products"), summary = "Get Product", status_codes(200, 404, 500))]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Product retrieved", product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, make_product, public_service},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        public_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products/{uuid}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(move |_| Ok(make_product(uuid)));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.uuid, uuid.into_uuid());
        assert_eq!(body.data.origin, "local");
        assert!(body.data.in_stock, "twelve units are in stock");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_not_found_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "product_not_found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_invalid_uuid_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_get_product().never();

        let res = TestClient::get("http://example.com/products/123")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
