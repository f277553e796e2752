//! Cart Data

use crate::domain::{
    carts::records::{CartItemRecord, CartItemUuid, CartRecord},
    products::records::ProductUuid,
};

/// Item to add to the active cart. Quantities merge with an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// Absolute quantity for an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub item: CartItemUuid,
    pub quantity: u32,
}

/// A changed line together with the cart it now sits in.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemChange {
    pub item: CartItemRecord,
    pub cart: CartRecord,
}
