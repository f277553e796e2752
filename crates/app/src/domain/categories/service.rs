//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{CategoryFilter, CategoryUpdate, NewCategory},
            errors::CategoriesServiceError,
            records::CategoryRecord,
            repository::PgCategoriesRepository,
        },
        products::{data::ProductFilter, records::ProductRecord, repository::PgProductsRepository},
        slugs::slug_or_derive,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
    products: PgProductsRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

/// Trim the name and settle the slug, rejecting blanks.
fn normalise(name: &str, slug: Option<&str>) -> Result<(String, String), CategoriesServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(CategoriesServiceError::InvalidName);
    }

    let slug = slug_or_derive(slug, name);

    if slug.is_empty() {
        return Err(CategoriesServiceError::InvalidSlug);
    }

    Ok((name.to_string(), slug))
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let (name, slug) = normalise(&category.name, category.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, category.uuid, &name, &slug)
            .await?;

        tx.commit().await?;

        info!(category = %created.uuid, slug = %created.slug, "created category");

        Ok(created)
    }

    async fn update_category(
        &self,
        slug: &str,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let (name, new_slug) = normalise(&update.name, update.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, slug, &name, &new_slug)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, slug: &str) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, slug).await?;

        if category.product_count > 0 {
            return Err(CategoriesServiceError::InUse);
        }

        let purged = self.repository.purge_deleted_products(&mut tx, slug).await?;

        // Deleted products still on an order keep the category alive.
        let rows_affected = self.repository.delete_category(&mut tx, slug).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(category = %category.uuid, purged, "deleted category");

        Ok(())
    }

    async fn category_products(
        &self,
        slug: &str,
    ) -> Result<Vec<ProductRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, slug).await?;

        let filter = ProductFilter {
            category: Some(category.uuid),
            ..ProductFilter::default()
        };

        let products = self.products.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// List categories, optionally filtered by a name or slug search.
    async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category by slug.
    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Create a category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Rename a category and optionally change its slug.
    async fn update_category(
        &self,
        slug: &str,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Delete a category without live products. Its deleted products go
    /// with it unless an order still refers to them.
    async fn delete_category(&self, slug: &str) -> Result<(), CategoriesServiceError>;

    /// Live products filed under a category.
    async fn category_products(
        &self,
        slug: &str,
    ) -> Result<Vec<ProductRecord>, CategoriesServiceError>;
}
