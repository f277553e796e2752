//! Product Errors

use tracing::error;

use larder_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict(
            "product_already_exists",
            "A product with this slug already exists",
        ),
        ProductsServiceError::NotFound => {
            ApiError::not_found("product_not_found", "Product not found")
        }
        ProductsServiceError::InvalidReference => {
            ApiError::bad_request("category_not_found", "Category does not exist")
                .with_detail("category")
        }
        ProductsServiceError::InvalidName => {
            ApiError::bad_request("invalid_name", "Product name must not be empty")
                .with_detail("name")
        }
        ProductsServiceError::InvalidSlug => {
            ApiError::bad_request("invalid_slug", "Product slug must not be empty")
                .with_detail("slug")
        }
        ProductsServiceError::InvalidPrice => invalid_price(),
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn invalid_price() -> ApiError {
    ApiError::bad_request("invalid_price", "Price must be greater than zero").with_detail("price")
}

pub(crate) fn invalid_stock() -> ApiError {
    ApiError::bad_request("invalid_stock", "Stock must be zero or more").with_detail("stock")
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_category_is_a_bad_request() {
        let error = into_api_error(ProductsServiceError::InvalidReference);

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "category_not_found");
    }

    #[test]
    fn duplicate_slug_is_a_conflict() {
        assert_eq!(
            into_api_error(ProductsServiceError::AlreadyExists).status(),
            StatusCode::CONFLICT
        );
    }
}
