//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductRequest, ProductResponse, into_api_error},
    responses::Envelope,
    state::State,
};

/// Update Product Handler
///
/// Replaces every editable field.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 409, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();
    let update = json.into_inner().into_update()?;

    let product = state
        .app
        .products
        .update_product(uuid.into(), update)
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %uuid, price = product.price, "updated product");

    Ok(Envelope::json("Product updated", product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, STAFF, make_product, service_as};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            STAFF,
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products/{uuid}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid && update.price == 300 && update.slug.as_deref() == Some("pink-lady")
            })
            .return_once(move |_, update| {
                let mut product = make_product(uuid);
                product.price = update.price;
                Ok(product)
            });

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "category": Uuid::nil(),
                "name": "Pink Lady",
                "slug": "pink-lady",
                "price": 300,
                "stock": 4,
            }))
            .send(&make_service(products))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.price, 300);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "category": Uuid::nil(), "name": "Pears", "price": 300 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
