//! Delivery Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::orders::{lifecycle::OrderStatus, records::OrderUuid},
    uuids::TypedUuid,
};

/// Delivery UUID
pub type DeliveryUuid = TypedUuid<DeliveryRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryStatus {
    #[default]
    Preparation,
    OnTheWay,
    Delivered,
}

impl DeliveryStatus {
    pub const ALL: [Self; 3] = [Self::Preparation, Self::OnTheWay, Self::Delivered];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparation => "preparation",
            Self::OnTheWay => "on_the_way",
            Self::Delivered => "delivered",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preparation => "In preparation",
            Self::OnTheWay => "On the way",
            Self::Delivered => "Delivered",
        }
    }

    /// Order status a delivery update pulls the order into, if any.
    #[must_use]
    pub fn order_nudge(self, order: OrderStatus) -> Option<OrderStatus> {
        match (self, order) {
            (Self::OnTheWay, OrderStatus::Confirmed) => Some(OrderStatus::Processing),
            (Self::Delivered, OrderStatus::Processing | OrderStatus::Shipped) => {
                Some(OrderStatus::Delivered)
            }
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown delivery status `{0}`")]
pub struct UnknownDeliveryStatus(pub String);

impl FromStr for DeliveryStatus {
    type Err = UnknownDeliveryStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownDeliveryStatus(value.to_string()))
    }
}

/// The parts of the order a delivery shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOrder {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: u64,
}

/// Delivery Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub uuid: DeliveryUuid,
    pub order: DeliveryOrder,
    pub status: DeliveryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DeliveryRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != DeliveryStatus::Delivered
    }
}
