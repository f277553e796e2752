//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod confirm;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod pending;
pub(crate) mod recent;
pub(crate) mod update_status;
