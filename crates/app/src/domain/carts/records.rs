//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        money::{AmountError, cents, line_total, sum, with_tax},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub is_active: bool,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals over the cart's lines at current product prices.
    ///
    /// # Errors
    ///
    /// Fails when a line or the cart total does not fit in cents.
    pub fn summary(&self) -> Result<CartSummary, AmountError> {
        let line_totals = self
            .items
            .iter()
            .map(CartItemRecord::total_price)
            .collect::<Result<Vec<_>, _>>()?;

        let total_price = cents(&sum(line_totals)?)?;

        Ok(CartSummary {
            total_items: self.items.iter().map(|item| u64::from(item.quantity)).sum(),
            items_count: self.items.len() as u64,
            total_price,
            total_price_with_tax: with_tax(total_price)?,
        })
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record. Name and price are read live from the product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_price: u64,
    pub quantity: u32,
    pub added_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// # Errors
    ///
    /// Fails when price times quantity overflows.
    pub fn total_price(&self) -> Result<u64, AmountError> {
        line_total(self.product_price, self.quantity)
    }
}

/// Cart totals. All zero when the user has no active cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub total_items: u64,
    pub items_count: u64,
    pub total_price: u64,
    pub total_price_with_tax: u64,
}
