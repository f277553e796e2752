//! Notification Errors

use tracing::error;

use larder_app::domain::notifications::NotificationsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: NotificationsServiceError) -> ApiError {
    match error {
        NotificationsServiceError::NotFound => {
            ApiError::not_found("notification_not_found", "Notification not found")
        }
        NotificationsServiceError::ProductNotFound => {
            ApiError::not_found("product_not_found", "Product not found")
        }
        NotificationsServiceError::InvalidDiscount => invalid_discount(),
        NotificationsServiceError::InvalidReference => {
            ApiError::bad_request("invalid_reference", "Referenced resource does not exist")
        }
        NotificationsServiceError::MissingRequiredData | NotificationsServiceError::InvalidData => {
            ApiError::bad_request("invalid_data", "Invalid notification payload")
        }
        NotificationsServiceError::Sql(source) => {
            error!("notification storage error: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn invalid_discount() -> ApiError {
    ApiError::bad_request("invalid_discount", "Discount must be between 1 and 100 percent")
        .with_detail("discount_percent")
}
