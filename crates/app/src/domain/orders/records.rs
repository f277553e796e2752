//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        orders::{data::DeliveryAddress, lifecycle::OrderStatus},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    Cash,
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [Self; 4] = [Self::Card, Self::Paypal, Self::Cash, Self::Transfer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Cash => "cash",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}

/// Order Record with its frozen lines and status history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: bool,
    pub delivery: DeliveryAddress,
    pub subtotal: u64,
    pub tax_amount: u64,
    pub shipping_cost: u64,
    pub total_amount: u64,
    pub items: Vec<OrderItemRecord>,
    pub history: Vec<OrderHistoryRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub confirmed_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
}

impl OrderRecord {
    /// Number of units across all lines.
    #[must_use]
    pub fn items_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// A product line as it was at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_price: u64,
    pub quantity: u32,
    pub total_price: u64,
}

/// Order History UUID
pub type OrderHistoryUuid = TypedUuid<OrderHistoryRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHistoryRecord {
    pub uuid: OrderHistoryUuid,
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub comment: String,
    pub created_by: Option<UserUuid>,
    pub created_at: Timestamp,
}
