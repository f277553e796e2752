//! Notification Handlers

pub(crate) mod clear_read;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mark_all_as_read;
pub(crate) mod mark_as_read;
pub(crate) mod recent;
pub(crate) mod send_new_product;
pub(crate) mod send_promotion;
pub(crate) mod unread;
