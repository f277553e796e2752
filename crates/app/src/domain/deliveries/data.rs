//! Deliveries Data

use crate::domain::{
    deliveries::records::{DeliveryStatus, DeliveryUuid},
    orders::records::OrderUuid,
};

/// Open tracking for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDelivery {
    pub uuid: DeliveryUuid,
    pub order: OrderUuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatusUpdate {
    pub status: DeliveryStatus,
    pub comment: Option<String>,
}

/// Which of a user's deliveries to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DeliveryScope {
    pub(crate) active_only: bool,
    pub(crate) within_days: Option<i32>,
}
