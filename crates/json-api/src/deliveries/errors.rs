//! Delivery Errors

use tracing::error;

use larder_app::domain::deliveries::DeliveriesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: DeliveriesServiceError) -> ApiError {
    match error {
        DeliveriesServiceError::NotFound => {
            ApiError::not_found("delivery_not_found", "Delivery not found")
        }
        DeliveriesServiceError::OrderNotFound => {
            ApiError::not_found("order_not_found", "Order not found")
        }
        DeliveriesServiceError::AlreadyExists => ApiError::conflict(
            "delivery_already_exists",
            "This order already has a delivery",
        ),
        DeliveriesServiceError::InvalidReference => {
            ApiError::bad_request("invalid_reference", "Referenced resource does not exist")
        }
        DeliveriesServiceError::MissingRequiredData | DeliveriesServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid delivery payload")
        }
        DeliveriesServiceError::Sql(source) => {
            error!("delivery storage error: {source}");

            ApiError::internal()
        }
    }
}
