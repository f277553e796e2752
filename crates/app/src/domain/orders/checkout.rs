//! Checkout planning.
//!
//! Turns cart lines and the locked product rows into frozen order lines,
//! without touching the database.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::{
    carts::records::CartItemRecord,
    money::line_total,
    products::records::{ProductRecord, ProductUuid, Unpurchasable},
};

/// One frozen order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    pub product: ProductUuid,
    pub product_name: String,
    pub product_price: u64,
    pub quantity: u32,
    pub total_price: u64,
}

/// Lines to write plus the products the order empties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub lines: SmallVec<[PlannedLine; 8]>,
    pub depleted: SmallVec<[ProductUuid; 4]>,
}

impl CheckoutPlan {
    pub fn line_totals(&self) -> impl Iterator<Item = u64> + '_ {
        self.lines.iter().map(|line| line.total_price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("product {product} is not available")]
    ProductNotAvailable { product: ProductUuid },

    #[error("insufficient stock for product {product}, {available} available")]
    InsufficientStock { product: ProductUuid, available: u32 },

    #[error("line total for product {product} is out of range")]
    LineTotalOutOfRange { product: ProductUuid },
}

/// Check every cart line against its product and price it.
///
/// # Errors
///
/// Fails on the first line whose product is gone, withdrawn from sale,
/// short of stock or priced past what cents can hold.
pub fn plan_checkout(
    items: &[CartItemRecord],
    products: &[ProductRecord],
) -> Result<CheckoutPlan, CheckoutError> {
    let by_uuid: FxHashMap<ProductUuid, &ProductRecord> =
        products.iter().map(|product| (product.uuid, product)).collect();

    let mut plan = CheckoutPlan::default();

    for item in items {
        let Some(product) = by_uuid.get(&item.product_uuid) else {
            return Err(CheckoutError::ProductNotAvailable {
                product: item.product_uuid,
            });
        };

        product
            .ensure_purchasable(item.quantity)
            .map_err(|reason| match reason {
                Unpurchasable::NotAvailable => CheckoutError::ProductNotAvailable {
                    product: product.uuid,
                },
                Unpurchasable::InsufficientStock { available } => {
                    CheckoutError::InsufficientStock {
                        product: product.uuid,
                        available,
                    }
                }
            })?;

        if product.stock == item.quantity {
            plan.depleted.push(product.uuid);
        }

        let total_price = line_total(product.price, item.quantity).map_err(|_overflow| {
            CheckoutError::LineTotalOutOfRange {
                product: product.uuid,
            }
        })?;

        plan.lines.push(PlannedLine {
            product: product.uuid,
            product_name: product.name.clone(),
            product_price: product.price,
            quantity: item.quantity,
            total_price,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::domain::{
        carts::records::{CartItemUuid, CartUuid},
        categories::records::CategoryUuid,
        products::records::ProductOrigin,
    };

    fn product(name: &str, price: u64, stock: u32) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::new(),
            category_name: "Fruits".to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: String::new(),
            origin: ProductOrigin::Local,
            price,
            stock,
            is_available: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn item(product: &ProductRecord, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: CartUuid::new(),
            product_uuid: product.uuid,
            product_name: product.name.clone(),
            product_price: product.price,
            quantity,
            added_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn prices_lines_and_flags_emptied_products() -> Result<(), CheckoutError> {
        let apples = product("Apples", 250, 10);
        let pears = product("Pears", 300, 2);

        let plan = plan_checkout(
            &[item(&apples, 4), item(&pears, 2)],
            &[pears.clone(), apples.clone()],
        )?;

        assert_eq!(plan.line_totals().collect::<Vec<_>>(), [1_000, 600]);
        assert_eq!(plan.depleted.as_slice(), [pears.uuid]);

        Ok(())
    }

    #[test]
    fn unavailable_product_is_rejected() {
        let mut apples = product("Apples", 250, 10);
        apples.is_available = false;

        assert_eq!(
            plan_checkout(&[item(&apples, 1)], &[apples.clone()]),
            Err(CheckoutError::ProductNotAvailable {
                product: apples.uuid
            })
        );
    }

    #[test]
    fn deleted_or_missing_product_is_rejected() {
        let mut apples = product("Apples", 250, 10);
        let pears = product("Pears", 300, 2);
        apples.deleted_at = Some(Timestamp::UNIX_EPOCH);

        assert!(matches!(
            plan_checkout(&[item(&apples, 1)], &[apples.clone()]),
            Err(CheckoutError::ProductNotAvailable { .. })
        ));

        assert_eq!(
            plan_checkout(&[item(&pears, 1)], &[]),
            Err(CheckoutError::ProductNotAvailable {
                product: pears.uuid
            })
        );
    }

    #[test]
    fn overflowing_line_total_is_rejected() {
        let gold = product("Gold", u64::MAX / 2, 10);

        assert_eq!(
            plan_checkout(&[item(&gold, 3)], &[gold.clone()]),
            Err(CheckoutError::LineTotalOutOfRange { product: gold.uuid })
        );
    }

    #[test]
    fn short_stock_reports_what_is_left() {
        let pears = product("Pears", 300, 2);

        assert_eq!(
            plan_checkout(&[item(&pears, 3)], &[pears.clone()]),
            Err(CheckoutError::InsufficientStock {
                product: pears.uuid,
                available: 2
            })
        );
    }
}
