//! Notification Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user_uuid: UserUuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A user's notifications, newest first, with the unread total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationInbox {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: u64,
}

/// Result of a broadcast about a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broadcast {
    pub product: ProductUuid,
    pub recipients: u64,
}
