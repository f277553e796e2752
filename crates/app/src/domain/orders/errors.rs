//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    money::AmountError,
    orders::{checkout::CheckoutError, data::AddressError, lifecycle::InvalidTransition},
    products::records::ProductUuid,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("no active cart")]
    CartNotFound,

    #[error("cart is empty")]
    CartEmpty,

    #[error("product {product} is not available")]
    ProductNotAvailable { product: ProductUuid },

    #[error("insufficient stock for product {product}, {available} available")]
    InsufficientStock { product: ProductUuid, available: u32 },

    #[error("invalid delivery address: {0}")]
    InvalidDeliveryAddress(#[source] AddressError),

    #[error("order is already confirmed")]
    AlreadyConfirmed,

    #[error("order can no longer be cancelled")]
    CannotBeCancelled,

    #[error(transparent)]
    InvalidTransition(InvalidTransition),

    #[error("order total is out of range")]
    Amount(#[from] AmountError),

    #[error("could not allocate an order number")]
    OrderNumberExhausted,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<CheckoutError> for OrdersServiceError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::ProductNotAvailable { product } => Self::ProductNotAvailable { product },
            CheckoutError::InsufficientStock { product, available } => {
                Self::InsufficientStock { product, available }
            }
            CheckoutError::LineTotalOutOfRange { .. } => Self::Amount(AmountError::Overflow),
        }
    }
}

impl From<AddressError> for OrdersServiceError {
    fn from(error: AddressError) -> Self {
        Self::InvalidDeliveryAddress(error)
    }
}

impl From<InvalidTransition> for OrdersServiceError {
    fn from(error: InvalidTransition) -> Self {
        Self::InvalidTransition(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::lifecycle::OrderStatus;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }

    #[test]
    fn checkout_errors_keep_the_product() {
        let product = ProductUuid::new();

        assert!(matches!(
            OrdersServiceError::from(CheckoutError::InsufficientStock {
                product,
                available: 3
            }),
            OrdersServiceError::InsufficientStock { product: p, available: 3 } if p == product
        ));
    }

    #[test]
    fn overflowing_line_becomes_an_amount_error() {
        assert!(matches!(
            OrdersServiceError::from(CheckoutError::LineTotalOutOfRange {
                product: ProductUuid::new()
            }),
            OrdersServiceError::Amount(AmountError::Overflow)
        ));
    }

    #[test]
    fn invalid_transition_message_names_both_states() {
        let error = OrdersServiceError::from(InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });

        assert_eq!(error.to_string(), "cannot move an order from delivered to pending");
    }
}
