//! Category Errors

use tracing::error;

use larder_app::domain::categories::CategoriesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CategoriesServiceError) -> ApiError {
    match error {
        CategoriesServiceError::AlreadyExists => ApiError::conflict(
            "category_already_exists",
            "A category with this name or slug already exists",
        ),
        CategoriesServiceError::NotFound => {
            ApiError::not_found("category_not_found", "Category not found")
        }
        CategoriesServiceError::InUse => ApiError::bad_request(
            "category_in_use",
            "Category still has products and cannot be deleted",
        ),
        CategoriesServiceError::InvalidName => {
            ApiError::bad_request("invalid_name", "Category name must not be empty")
                .with_detail("name")
        }
        CategoriesServiceError::InvalidSlug => {
            ApiError::bad_request("invalid_slug", "Category slug must not be empty")
                .with_detail("slug")
        }
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage error: {source}");

            ApiError::internal()
        }
    }
}
