//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{money::AmountError, products::records::Unpurchasable};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("no active cart")]
    NotFound,

    #[error("an active cart already exists")]
    AlreadyExists,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("product is not available")]
    ProductNotAvailable,

    #[error("insufficient stock, {available} available")]
    InsufficientStock { available: u32 },

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("cart is already empty")]
    Empty,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("cart total is out of range")]
    Amount(#[from] AmountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
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

impl From<Unpurchasable> for CartsServiceError {
    fn from(reason: Unpurchasable) -> Self {
        match reason {
            Unpurchasable::NotAvailable => Self::ProductNotAvailable,
            Unpurchasable::InsufficientStock { available } => Self::InsufficientStock { available },
        }
    }
}
