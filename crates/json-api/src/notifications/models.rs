//! Notification Models

use salvo::{oapi::ToSchema, prelude::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::notifications::records::{
    Broadcast, NotificationInbox, NotificationRecord,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        Self {
            uuid: notification.uuid.into(),
            title: notification.title,
            message: notification.message,
            is_read: notification.is_read,
            created_at: notification.created_at.to_string(),
        }
    }
}

/// The notification list with the number still unread.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InboxEnvelope {
    pub message: String,
    pub count: usize,
    pub unread_count: u64,
    pub data: Vec<NotificationResponse>,
}

impl InboxEnvelope {
    pub(crate) fn json(message: impl Into<String>, inbox: NotificationInbox) -> Json<Self> {
        let data: Vec<NotificationResponse> =
            inbox.notifications.into_iter().map(Into::into).collect();

        Json(Self {
            message: message.into(),
            count: data.len(),
            unread_count: inbox.unread_count,
            data,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BroadcastResponse {
    pub product_uuid: Uuid,
    /// Users who received a notification
    pub recipients: u64,
}

impl From<Broadcast> for BroadcastResponse {
    fn from(broadcast: Broadcast) -> Self {
        Self {
            product_uuid: broadcast.product.into(),
            recipients: broadcast.recipients,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionRequest {
    pub product_id: Uuid,
    #[serde(alias = "discount")]
    pub discount_percent: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewProductRequest {
    pub product_id: Uuid,
}
