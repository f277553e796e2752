//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use larder_app::domain::categories::records::CategoryUuid;

use crate::{
    categories::{CategoryRequest, CategoryResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    status_codes(201, 400, 401, 403, 409, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into_new(CategoryUuid::new()))
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/categories/{}", category.slug), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::json("Category created", category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, STAFF, make_category, service_as},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        service_as(
            STAFF,
            Mocks {
                categories,
                ..Mocks::default()
            },
            Router::with_path("categories").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_category_without_slug() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|new| new.name == "Fruits & Légumes" && new.slug.is_none())
            .return_once(|new| Ok(make_category(&new.name, "fruits-legumes")));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Fruits & Légumes" }))
            .send(&make_service(categories))
            .await;

        let body: Envelope<CategoryResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/categories/fruits-legumes"));
        assert_eq!(body.data.slug, "fruits-legumes");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_category_returns_409() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Fruits", "slug": "fruits" }))
            .send(&make_service(categories))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.error, "category_already_exists");

        Ok(())
    }
}
