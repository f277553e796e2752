//! Product Handlers

pub(crate) mod available;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod low_stock;
pub(crate) mod toggle_availability;
pub(crate) mod update;
pub(crate) mod update_stock;
