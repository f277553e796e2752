//! Cart Handlers
//!
//! Every route acts on the caller's active cart.

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod create;
pub(crate) mod current;
pub(crate) mod remove_item;
pub(crate) mod summary;
pub(crate) mod update_item;
