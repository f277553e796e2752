//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        notifications::{messages, repository::PgNotificationsRepository},
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::{PgProductsRepository, ProductFields},
        },
        slugs::slug_or_derive,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    notifications: PgNotificationsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    /// Warn shoppers holding the product once it can no longer be bought.
    async fn alert_if_stocked_out(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
    ) -> Result<(), sqlx::Error> {
        if product.in_stock() && product.is_available {
            return Ok(());
        }

        let notified = self
            .notifications
            .notify_cart_holders(tx, product.uuid, &messages::stock_out(&product.name))
            .await?;

        info!(product = %product.uuid, notified, "sent stock-out alert");

        Ok(())
    }
}

/// Trim the name, settle the slug and check the price.
fn normalise(
    name: &str,
    slug: Option<&str>,
    price: u64,
) -> Result<(String, String), ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::InvalidName);
    }

    if price == 0 {
        return Err(ProductsServiceError::InvalidPrice);
    }

    let slug = slug_or_derive(slug, name);

    if slug.is_empty() {
        return Err(ProductsServiceError::InvalidSlug);
    }

    Ok((name.to_string(), slug))
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let (name, slug) = normalise(&product.name, product.slug.as_deref(), product.price)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                product.uuid,
                ProductFields::of_new(&product, &name, &slug),
            )
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, slug = %created.slug, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let (name, slug) = normalise(&update.name, update.slug.as_deref(), update.price)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                ProductFields::of_update(&update, &name, &slug),
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn available_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        self.list_products(ProductFilter::available()).await
    }

    async fn low_stock_products(
        &self,
        threshold: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .low_stock_products(&mut tx, threshold)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn update_stock(
        &self,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_stock(&mut tx, product, stock).await?;

        if stock == 0 {
            self.alert_if_stocked_out(&mut tx, &updated).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn toggle_availability(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.toggle_availability(&mut tx, product).await?;

        if !updated.is_available {
            self.alert_if_stocked_out(&mut tx, &updated).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List live products matching a filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Create a product in an existing category.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace a product's editable fields.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-delete a product. Order lines keep referencing it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Products that are available and in stock.
    async fn available_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products with stock at or below `threshold`, lowest first.
    async fn low_stock_products(
        &self,
        threshold: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Set the stock level.
    async fn update_stock(
        &self,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Flip whether the product can be bought.
    async fn toggle_availability(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
