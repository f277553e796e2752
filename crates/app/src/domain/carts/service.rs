//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemChange, CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartSummary, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
    ) -> Result<CartRecord, sqlx::Error> {
        cart.items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        Ok(cart)
    }

    async fn locked_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository
            .lock_active_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn locked_or_new_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        if let Some(cart) = self.carts_repository.lock_active_cart(tx, user).await? {
            return Ok(cart);
        }

        self.carts_repository
            .create_cart_if_absent(tx, CartUuid::new(), user)
            .await?;

        self.carts_repository
            .lock_active_cart(tx, user)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn live_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, CartsServiceError> {
        match self.products_repository.get_product(tx, product).await {
            Ok(product) => Ok(product),
            Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::ProductNotFound),
            Err(error) => Err(error.into()),
        }
    }

    async fn finish_change(
        &self,
        mut tx: Transaction<'_, Postgres>,
        cart: CartRecord,
        item: CartItemRecord,
    ) -> Result<CartItemChange, CartsServiceError> {
        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartItemChange { item, cart })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn current_cart(&self, user: UserUuid) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = match self.carts_repository.find_active_cart(&mut tx, user).await? {
            Some(cart) => Some(self.with_items(&mut tx, cart).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(cart)
    }

    async fn create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .carts_repository
            .find_active_cart(&mut tx, user)
            .await?
            .is_some()
        {
            return Err(CartsServiceError::AlreadyExists);
        }

        let created = self
            .carts_repository
            .create_cart(&mut tx, CartUuid::new(), user)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemChange, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let product = self.live_product(&mut tx, item.product).await?;
        let cart = self.locked_or_new_cart(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_cart_item_by_product(&mut tx, cart.uuid, product.uuid)
            .await?;

        let line = match existing {
            Some(existing) => {
                let merged = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CartsServiceError::InvalidQuantity)?;

                product.ensure_purchasable(merged)?;

                self.items_repository
                    .set_quantity(&mut tx, existing.uuid, merged)
                    .await?
            }
            None => {
                product.ensure_purchasable(item.quantity)?;

                self.items_repository
                    .create_cart_item(&mut tx, cart.uuid, product.uuid, item.quantity)
                    .await?
            }
        };

        self.finish_change(tx, cart, line).await
    }

    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemChange, CartsServiceError> {
        if update.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.locked_cart(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_cart_item(&mut tx, cart.uuid, update.item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let product = self.live_product(&mut tx, existing.product_uuid).await?;

        product.ensure_purchasable(update.quantity)?;

        let line = self
            .items_repository
            .set_quantity(&mut tx, existing.uuid, update.quantity)
            .await?;

        self.finish_change(tx, cart, line).await
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.locked_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.locked_cart(&mut tx, user).await?;

        let removed = self
            .items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        if removed == 0 {
            return Err(CartsServiceError::Empty);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn summary(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError> {
        Ok(self
            .current_cart(user)
            .await?
            .map(|cart| cart.summary())
            .transpose()?
            .unwrap_or_default())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's active cart with its items, if there is one.
    async fn current_cart(&self, user: UserUuid) -> Result<Option<CartRecord>, CartsServiceError>;

    /// Open an active cart. Fails if one is already open.
    async fn create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product, opening a cart when needed.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemChange, CartsServiceError>;

    /// Set a line's quantity.
    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemChange, CartsServiceError>;

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line from the active cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    async fn summary(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{domain::products::ProductsService, test::TestContext};

    #[tokio::test]
    async fn current_cart_is_none_until_created() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;

        assert!(ctx.carts.current_cart(marie.uuid).await?.is_none());

        let cart = ctx.carts.create_cart(marie.uuid).await?;
        let current = ctx.carts.current_cart(marie.uuid).await?;

        assert_eq!(current.map(|c| c.uuid), Some(cart.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn second_create_cart_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;

        ctx.carts.create_cart(marie.uuid).await?;

        let result = ctx.carts.create_cart(marie.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_opens_cart_and_merges_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        let first = ctx
            .carts
            .add_item(
                marie.uuid,
                NewCartItem {
                    product: apple.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let second = ctx
            .carts
            .add_item(
                marie.uuid,
                NewCartItem {
                    product: apple.uuid,
                    quantity: 3,
                },
            )
            .await?;

        assert_eq!(first.cart.uuid, second.cart.uuid);
        assert_eq!(second.item.uuid, first.item.uuid);
        assert_eq!(second.item.quantity, 5);
        assert_eq!(second.cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_first_adds_share_one_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;
        let pear = ctx.create_product(fruits.uuid, "Poire", 300, 5).await;

        let (first, second) = tokio::join!(
            ctx.carts.add_item(
                marie.uuid,
                NewCartItem {
                    product: apple.uuid,
                    quantity: 1,
                },
            ),
            ctx.carts.add_item(
                marie.uuid,
                NewCartItem {
                    product: pear.uuid,
                    quantity: 2,
                },
            ),
        );

        let (first, second) = (first?, second?);

        assert_eq!(first.cart.uuid, second.cart.uuid);

        let cart = ctx.carts.current_cart(marie.uuid).await?;

        assert_eq!(cart.map(|c| c.items.len()), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn merged_quantity_beyond_stock_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        ctx.add_to_cart(marie.uuid, apple.uuid, 4).await;

        let result = ctx
            .carts
            .add_item(
                marie.uuid,
                NewCartItem {
                    product: apple.uuid,
                    quantity: 2,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock { available: 5 })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let cart = ctx.carts.current_cart(marie.uuid).await?;

        assert_eq!(cart.map(|c| c.items[0].quantity), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn add_unavailable_or_unknown_product_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        ctx.products.toggle_availability(apple.uuid).await?;

        let unavailable = ctx
            .carts
            .add_item(
                marie.uuid,
                NewCartItem {
                    product: apple.uuid,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(unavailable, Err(CartsServiceError::ProductNotAvailable)),
            "expected ProductNotAvailable, got {unavailable:?}"
        );

        let unknown = ctx
            .carts
            .add_item(
                marie.uuid,
                NewCartItem {
                    product: ProductUuid::new(),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(unknown, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {unknown:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_item_sets_quantity_and_checks_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        let added = ctx.add_to_cart(marie.uuid, apple.uuid, 1).await;

        let updated = ctx
            .carts
            .update_item(
                marie.uuid,
                CartItemUpdate {
                    item: added.item.uuid,
                    quantity: 5,
                },
            )
            .await?;

        assert_eq!(updated.item.quantity, 5);

        let too_many = ctx
            .carts
            .update_item(
                marie.uuid,
                CartItemUpdate {
                    item: added.item.uuid,
                    quantity: 6,
                },
            )
            .await;

        assert!(
            matches!(too_many, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {too_many:?}"
        );

        let zero = ctx
            .carts
            .update_item(
                marie.uuid,
                CartItemUpdate {
                    item: added.item.uuid,
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(zero, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {zero:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn item_operations_are_scoped_to_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let pierre = ctx.create_user("pierre").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        let added = ctx.add_to_cart(marie.uuid, apple.uuid, 1).await;
        ctx.carts.create_cart(pierre.uuid).await?;

        let result = ctx.carts.remove_item(pierre.uuid, added.item.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        let cart = ctx.carts.remove_item(marie.uuid, added.item.uuid).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_reports_missing_and_empty_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;

        let missing = ctx.carts.clear_cart(marie.uuid).await;

        assert!(
            matches!(missing, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        ctx.add_to_cart(marie.uuid, apple.uuid, 2).await;

        let cleared = ctx.carts.clear_cart(marie.uuid).await?;

        assert!(cleared.is_empty());

        let again = ctx.carts.clear_cart(marie.uuid).await;

        assert!(
            matches!(again, Err(CartsServiceError::Empty)),
            "expected Empty, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn summary_totals_with_tax() -> TestResult {
        let ctx = TestContext::new().await;
        let marie = ctx.create_user("marie").await;
        let fruits = ctx.create_category("Fruits").await;
        let apple = ctx.create_product(fruits.uuid, "Pomme", 250, 5).await;
        let mango = ctx.create_product(fruits.uuid, "Mangue", 1_000, 5).await;

        assert_eq!(ctx.carts.summary(marie.uuid).await?, CartSummary::default());

        ctx.add_to_cart(marie.uuid, apple.uuid, 2).await;
        ctx.add_to_cart(marie.uuid, mango.uuid, 1).await;

        let summary = ctx.carts.summary(marie.uuid).await?;

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.items_count, 2);
        assert_eq!(summary.total_price, 1_500);
        assert_eq!(summary.total_price_with_tax, 1_800);

        Ok(())
    }
}
