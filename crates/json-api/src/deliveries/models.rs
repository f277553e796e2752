//! Delivery Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::deliveries::{
    data::DeliveryStatusUpdate,
    records::{DeliveryOrder, DeliveryRecord, DeliveryStatus},
};

use crate::{errors::ApiError, extensions::*};

/// The order a delivery tracks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryOrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub status: String,
    pub total_amount: u64,
}

impl From<DeliveryOrder> for DeliveryOrderResponse {
    fn from(order: DeliveryOrder) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            status: order.status.to_string(),
            total_amount: order.total_amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryResponse {
    pub uuid: Uuid,
    pub order: DeliveryOrderResponse,
    /// One of `preparation`, `on_the_way`, `delivered`
    pub status: String,
    pub status_display: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DeliveryRecord> for DeliveryResponse {
    fn from(delivery: DeliveryRecord) -> Self {
        Self {
            uuid: delivery.uuid.into(),
            is_active: delivery.is_active(),
            status: delivery.status.to_string(),
            status_display: delivery.status.label().to_string(),
            order: delivery.order.into(),
            created_at: delivery.created_at.to_string(),
            updated_at: delivery.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryRequest {
    #[serde(alias = "order")]
    pub order_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryStatusRequest {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TryFrom<DeliveryStatusRequest> for DeliveryStatusUpdate {
    type Error = ApiError;

    fn try_from(request: DeliveryStatusRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .parse::<DeliveryStatus>()
            .or_400("invalid_status", "Unknown delivery status")?;

        Ok(Self {
            status,
            comment: request.comment.filter(|comment| !comment.trim().is_empty()),
        })
    }
}
