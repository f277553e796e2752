//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    categories::{CategoryRequest, CategoryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 409, 500)
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(&slug.into_inner(), json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("Category updated", category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::test_helpers::{Mocks, STAFF, make_category, service_as};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        service_as(
            STAFF,
            Mocks {
                categories,
                ..Mocks::default()
            },
            Router::with_path("categories/{slug}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_rename_category() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(|slug, update| slug == "fruits" && update.name == "Fresh Fruits")
            .return_once(|_, update| Ok(make_category(&update.name, "fresh-fruits")));

        let mut res = TestClient::put("http://example.com/categories/fruits")
            .json(&json!({ "name": "Fresh Fruits", "slug": "fresh-fruits" }))
            .send(&make_service(categories))
            .await;

        let body: Envelope<CategoryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.name, "Fresh Fruits");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::InvalidName));

        let res = TestClient::put("http://example.com/categories/fruits")
            .json(&json!({ "name": "  " }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
