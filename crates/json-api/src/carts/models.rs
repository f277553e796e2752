//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::carts::{
    CartsServiceError,
    data::CartItemChange,
    records::{CartItemRecord, CartRecord, CartSummary},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    /// Current unit price in cents
    pub product_price: u64,
    pub quantity: u32,
    pub total_price: u64,
    pub added_at: String,
    pub updated_at: String,
}

impl TryFrom<CartItemRecord> for CartItemResponse {
    type Error = CartsServiceError;

    fn try_from(item: CartItemRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            total_price: item.total_price()?,
            product_name: item.product_name,
            product_price: item.product_price,
            quantity: item.quantity,
            added_at: item.added_at.to_string(),
            updated_at: item.updated_at.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub is_active: bool,
    pub items: Vec<CartItemResponse>,
    pub total_items: u64,
    pub items_count: u64,
    pub total_price: u64,
    pub total_price_with_tax: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<CartRecord> for CartResponse {
    type Error = CartsServiceError;

    fn try_from(cart: CartRecord) -> Result<Self, Self::Error> {
        let summary = cart.summary()?;

        Ok(Self {
            uuid: cart.uuid.into(),
            user_uuid: cart.user_uuid.into(),
            is_active: cart.is_active,
            items: cart
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
            total_items: summary.total_items,
            items_count: summary.items_count,
            total_price: summary.total_price,
            total_price_with_tax: summary.total_price_with_tax,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    /// Sum of quantities
    pub total_items: u64,
    /// Number of lines
    pub items_count: u64,
    pub total_price: u64,
    pub total_price_with_tax: u64,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            total_items: summary.total_items,
            items_count: summary.items_count,
            total_price: summary.total_price,
            total_price_with_tax: summary.total_price_with_tax,
        }
    }
}

/// A changed line together with the cart it belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemChangeResponse {
    pub message: String,
    pub item: CartItemResponse,
    pub cart: CartResponse,
}

impl CartItemChangeResponse {
    pub(crate) fn new(message: &str, change: CartItemChange) -> Result<Self, CartsServiceError> {
        Ok(Self {
            message: message.to_string(),
            item: change.item.try_into()?,
            cart: change.cart.try_into()?,
        })
    }
}
