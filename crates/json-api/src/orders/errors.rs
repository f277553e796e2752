//! Order Errors

use tracing::error;

use larder_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound => ApiError::not_found("order_not_found", "Order not found"),
        OrdersServiceError::AlreadyExists => {
            ApiError::conflict("order_already_exists", "Order already exists")
        }
        OrdersServiceError::CartNotFound => {
            ApiError::not_found("cart_not_found", "No active cart to check out")
        }
        OrdersServiceError::CartEmpty => {
            ApiError::bad_request("cart_empty", "Cannot order an empty cart")
        }
        OrdersServiceError::ProductNotAvailable { product } => {
            ApiError::bad_request("product_not_available", "A product is no longer available")
                .with_detail(format!("product: {product}"))
        }
        OrdersServiceError::InsufficientStock { product, available } => {
            ApiError::bad_request("insufficient_stock", "Not enough stock to place this order")
                .with_detail(format!("product: {product}"))
                .with_detail(format!("available: {available}"))
        }
        OrdersServiceError::InvalidDeliveryAddress(reason) => {
            ApiError::bad_request("invalid_delivery_address", "Invalid delivery address")
                .with_detail(reason.to_string())
        }
        OrdersServiceError::AlreadyConfirmed => {
            ApiError::bad_request("already_confirmed", "Order is already confirmed")
        }
        OrdersServiceError::CannotBeCancelled => {
            ApiError::bad_request("cannot_be_cancelled", "Order can no longer be cancelled")
        }
        OrdersServiceError::InvalidTransition(transition) => {
            ApiError::bad_request("invalid_transition", "Status change is not allowed")
                .with_detail(transition.to_string())
        }
        OrdersServiceError::InvalidReference => {
            ApiError::bad_request("invalid_reference", "Referenced resource does not exist")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid order payload")
        }
        OrdersServiceError::Amount(_) => {
            ApiError::bad_request("amount_out_of_range", "Order total is out of range")
        }
        OrdersServiceError::OrderNumberExhausted => {
            error!("ran out of order numbers for the current second");

            ApiError::internal()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            ApiError::internal()
        }
    }
}
