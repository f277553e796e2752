//! Orders

pub mod checkout;
pub mod data;
pub mod errors;
pub mod lifecycle;
pub mod pricing;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub(crate) mod transitions;

pub use errors::OrdersServiceError;
pub use service::*;
