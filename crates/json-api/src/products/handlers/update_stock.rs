//! Update Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{ProductResponse, into_api_error, invalid_stock},
    responses::Envelope,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockRequest {
    /// New absolute stock level
    #[serde(default)]
    pub quantity: i64,
}

/// Update Stock Handler
///
/// Sets the stock to an absolute level. Reaching zero alerts customers who
/// hold the product in their cart.
#[endpoint(
    tags("products"),
    summary = "Update Stock",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<StockRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let stock =
        u32::try_from(json.into_inner().quantity).map_err(|_out_of_range| invalid_stock())?;

    let product = state
        .app
        .products
        .update_stock(uuid.into_inner().into(), stock)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Stock updated", product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, STAFF, make_product, service_as},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            STAFF,
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products/{uuid}/update_stock").post(handler),
        )
    }

    #[tokio::test]
    async fn test_stock_out_reports_not_in_stock() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_stock()
            .once()
            .withf(move |product, stock| *product == uuid && *stock == 0)
            .return_once(move |_, stock| {
                let mut product = make_product(uuid);
                product.stock = stock;
                Ok(product)
            });

        let mut res = TestClient::post(format!("http://example.com/products/{uuid}/update_stock"))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(products))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.stock, 0);
        assert!(!body.data.in_stock, "zero stock is out of stock");

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_stock_returns_400() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_update_stock().never();

        let mut res = TestClient::post(format!("http://example.com/products/{uuid}/update_stock"))
            .json(&json!({ "quantity": -1 }))
            .send(&make_service(products))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "invalid_stock");

        Ok(())
    }
}
