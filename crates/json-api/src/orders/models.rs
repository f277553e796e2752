//! Order Models

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::orders::{
    data::{DEFAULT_COUNTRY, DeliveryAddress, NewOrder, OrderStatusUpdate},
    lifecycle::OrderStatus,
    records::{OrderHistoryRecord, OrderItemRecord, OrderRecord, OrderUuid, PaymentMethod},
};

use crate::{errors::ApiError, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    /// Name at checkout time
    pub product_name: String,
    /// Unit price at checkout time, in cents
    pub product_price: u64,
    pub quantity: u32,
    pub total_price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            product_price: item.product_price,
            quantity: item.quantity,
            total_price: item.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderHistoryResponse {
    pub uuid: Uuid,
    pub status: String,
    pub status_display: String,
    pub comment: String,
    /// `null` for system changes
    pub created_by: Option<Uuid>,
    pub created_at: String,
}

impl From<OrderHistoryRecord> for OrderHistoryResponse {
    fn from(entry: OrderHistoryRecord) -> Self {
        Self {
            uuid: entry.uuid.into(),
            status: entry.status.to_string(),
            status_display: entry.status.label().to_string(),
            comment: entry.comment,
            created_by: entry.created_by.map(Into::into),
            created_at: entry.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub order_number: String,
    pub status: String,
    pub status_display: String,
    pub payment_method: String,
    pub payment_status: bool,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    pub delivery_country: String,
    pub delivery_phone: String,
    pub subtotal: u64,
    pub tax_amount: u64,
    pub shipping_cost: u64,
    pub total_amount: u64,
    /// Units across all lines
    pub items_count: u64,
    pub items: Vec<OrderItemResponse>,
    pub history: Vec<OrderHistoryResponse>,
    pub created_at: String,
    pub updated_at: String,
    pub confirmed_at: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
}

fn stamp(timestamp: Option<Timestamp>) -> Option<String> {
    timestamp.as_ref().map(ToString::to_string)
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            items_count: order.items_count(),
            order_number: order.order_number,
            status: order.status.to_string(),
            status_display: order.status.label().to_string(),
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status,
            delivery_address: order.delivery.address,
            delivery_city: order.delivery.city,
            delivery_postal_code: order.delivery.postal_code,
            delivery_country: order.delivery.country,
            delivery_phone: order.delivery.phone,
            subtotal: order.subtotal,
            tax_amount: order.tax_amount,
            shipping_cost: order.shipping_cost,
            total_amount: order.total_amount,
            items: order.items.into_iter().map(Into::into).collect(),
            history: order.history.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            confirmed_at: stamp(order.confirmed_at),
            shipped_at: stamp(order.shipped_at),
            delivered_at: stamp(order.delivered_at),
        }
    }
}

/// Checkout payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderRequest {
    pub cart_id: Uuid,
    /// One of `card`, `paypal`, `cash`, `transfer`. Defaults to `card`
    #[serde(default)]
    pub payment_method: Option<String>,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    #[serde(default = "default_country")]
    pub delivery_country: String,
    pub delivery_phone: String,
    /// In cents
    #[serde(default)]
    pub shipping_cost: i64,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl OrderRequest {
    pub(crate) fn into_new(self, uuid: OrderUuid) -> Result<NewOrder, ApiError> {
        let payment_method = self
            .payment_method
            .as_deref()
            .map(str::parse::<PaymentMethod>)
            .transpose()
            .or_400("invalid_payment_method", "Unknown payment method")?
            .unwrap_or_default();

        let shipping_cost = u64::try_from(self.shipping_cost).map_err(|_negative| {
            ApiError::bad_request("invalid_shipping_cost", "Shipping cost must not be negative")
                .with_detail("shipping_cost")
        })?;

        Ok(NewOrder {
            uuid,
            cart: self.cart_id.into(),
            payment_method,
            delivery: DeliveryAddress {
                address: self.delivery_address,
                city: self.delivery_city,
                postal_code: self.delivery_postal_code,
                country: self.delivery_country,
                phone: self.delivery_phone,
            },
            shipping_cost,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    pub status: String,
    /// Defaults to "Status changed from X to Y"
    #[serde(default)]
    pub comment: Option<String>,
}

impl TryFrom<OrderStatusRequest> for OrderStatusUpdate {
    type Error = ApiError;

    fn try_from(request: OrderStatusRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .parse::<OrderStatus>()
            .or_400("invalid_status", "Unknown order status")?;

        Ok(Self {
            status,
            comment: request.comment.filter(|comment| !comment.trim().is_empty()),
        })
    }
}
