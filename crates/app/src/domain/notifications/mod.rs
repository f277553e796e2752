//! Notifications

pub mod errors;
pub(crate) mod messages;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::NotificationsServiceError;
pub use service::*;
