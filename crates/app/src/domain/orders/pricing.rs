//! Order totals and numbering.

use jiff::Timestamp;

use crate::domain::money::{AmountError, cents, euros, sum, tax_on};

/// Amounts frozen on an order at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub tax_amount: u64,
    pub shipping_cost: u64,
    pub total_amount: u64,
}

impl OrderTotals {
    /// `line_totals` are each line's price times quantity.
    ///
    /// # Errors
    ///
    /// Fails when the subtotal, tax or grand total does not fit in cents.
    pub fn compute(
        line_totals: impl IntoIterator<Item = u64>,
        shipping_cost: u64,
    ) -> Result<Self, AmountError> {
        let subtotal = sum(line_totals)?;
        let tax_amount = tax_on(&subtotal);
        let total_amount = subtotal.add(tax_amount)?.add(euros(shipping_cost)?)?;

        Ok(Self {
            subtotal: cents(&subtotal)?,
            tax_amount: cents(&tax_amount)?,
            shipping_cost,
            total_amount: cents(&total_amount)?,
        })
    }
}

/// `CMD` + UTC `YYYYmmddHHMMSS` + a three digit suffix.
#[must_use]
pub fn order_number(at: Timestamp, suffix: u16) -> String {
    format!("CMD{}{:03}", at.strftime("%Y%m%d%H%M%S"), suffix % 1000)
}
