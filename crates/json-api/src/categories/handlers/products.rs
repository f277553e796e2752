//! Category Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::into_api_error, errors::ApiError, extensions::*, products::ProductResponse,
    responses::ListEnvelope, state::State,
};

/// Category Products Handler
///
/// Live products filed under the category.
#[endpoint(tags("categories"), summary = "Category Products", status_codes(200, 404, 500))]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ListEnvelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .categories
        .category_products(&slug.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(ListEnvelope::json("Category products retrieved", products))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::{
        categories::{CategoriesServiceError, MockCategoriesService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, make_product, public_service};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        public_service(
            Mocks {
                categories,
                ..Mocks::default()
            },
            Router::with_path("categories/{slug}/products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_category_products() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_products()
            .once()
            .withf(|slug| slug == "fruits")
            .return_once(|_| {
                Ok(vec![
                    make_product(ProductUuid::new()),
                    make_product(ProductUuid::new()),
                ])
            });

        let mut res = TestClient::get("http://example.com/categories/fruits/products")
            .send(&make_service(categories))
            .await;

        let body: ListEnvelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_products()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get("http://example.com/categories/nope/products")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
