//! Cart Errors

use tracing::error;

use larder_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => ApiError::not_found("cart_not_found", "No active cart"),
        CartsServiceError::AlreadyExists => {
            ApiError::conflict("cart_already_exists", "An active cart already exists")
        }
        CartsServiceError::ItemNotFound => {
            ApiError::not_found("cart_item_not_found", "Cart item not found")
        }
        CartsServiceError::ProductNotFound => {
            ApiError::not_found("product_not_found", "Product not found")
        }
        CartsServiceError::ProductNotAvailable => {
            ApiError::bad_request("product_not_available", "Product is not available")
        }
        CartsServiceError::InsufficientStock { available } => {
            ApiError::bad_request("insufficient_stock", "Not enough stock for this quantity")
                .with_detail(format!("available: {available}"))
        }
        CartsServiceError::InvalidQuantity => invalid_quantity(),
        CartsServiceError::Empty => ApiError::bad_request("cart_empty", "Cart is already empty"),
        CartsServiceError::InvalidReference => {
            ApiError::bad_request("invalid_reference", "Referenced resource does not exist")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid cart payload")
        }
        CartsServiceError::Amount(_) => {
            ApiError::bad_request("amount_out_of_range", "Cart total is out of range")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn invalid_quantity() -> ApiError {
    ApiError::bad_request("invalid_quantity", "Quantity must be at least 1").with_detail("quantity")
}

/// Quantities arrive signed so negative values get their own error code.
pub(crate) fn parse_quantity(quantity: i64) -> Result<u32, ApiError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or_else(invalid_quantity)
}
