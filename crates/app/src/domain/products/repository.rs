//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    rows::{
        amount_to_i64, contains_pattern, quantity_to_i32, try_get_amount,
        try_get_optional_timestamp, try_get_parsed, try_get_quantity, try_get_timestamp,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOW_STOCK_PRODUCTS_SQL: &str = include_str!("sql/low_stock_products.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const UPDATE_STOCK_SQL: &str = include_str!("sql/update_stock.sql");
const TOGGLE_AVAILABILITY_SQL: &str = include_str!("sql/toggle_availability.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const REMOVE_FROM_CARTS_SQL: &str = include_str!("sql/remove_from_carts.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

/// Editable product columns, already validated by the service.
pub(crate) struct ProductFields<'a> {
    pub(crate) category: CategoryUuid,
    pub(crate) name: &'a str,
    pub(crate) slug: &'a str,
    pub(crate) description: &'a str,
    pub(crate) origin: &'static str,
    pub(crate) price: u64,
    pub(crate) stock: u32,
    pub(crate) is_available: bool,
}

impl<'a> ProductFields<'a> {
    pub(crate) fn of_new(product: &'a NewProduct, name: &'a str, slug: &'a str) -> Self {
        Self {
            category: product.category,
            name,
            slug,
            description: product.description.trim(),
            origin: product.origin.as_str(),
            price: product.price,
            stock: product.stock,
            is_available: product.is_available,
        }
    }

    pub(crate) fn of_update(update: &'a ProductUpdate, name: &'a str, slug: &'a str) -> Self {
        Self {
            category: update.category,
            name,
            slug,
            description: update.description.trim(),
            origin: update.origin.as_str(),
            price: update.price,
            stock: update.stock,
            is_available: update.is_available,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let sql = format!(
            "{LIST_PRODUCTS_SQL}ORDER BY {}, p.uuid",
            filter.sort.order_by()
        );

        let min_price = filter
            .min_price
            .map(|price| amount_to_i64(price, "min_price"))
            .transpose()?;

        let max_price = filter
            .max_price
            .map(|price| amount_to_i64(price, "max_price"))
            .transpose()?;

        query_as::<Postgres, ProductRecord>(&sql)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.is_available)
            .bind(min_price)
            .bind(max_price)
            .bind(filter.in_stock)
            .bind(filter.search.as_deref().map(contains_pattern))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn low_stock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        threshold: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOW_STOCK_PRODUCTS_SQL)
            .bind(i64::from(threshold))
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock the given products (live or not) in id order for the rest of the
    /// transaction.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        query_as::<Postgres, ProductRecord>(LOCK_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        fields: ProductFields<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(fields.category.into_uuid())
            .bind(fields.name)
            .bind(fields.slug)
            .bind(fields.description)
            .bind(fields.origin)
            .bind(amount_to_i64(fields.price, "price")?)
            .bind(quantity_to_i32(fields.stock, "stock")?)
            .bind(fields.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        fields: ProductFields<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(fields.category.into_uuid())
            .bind(fields.name)
            .bind(fields.slug)
            .bind(fields.description)
            .bind(fields.origin)
            .bind(amount_to_i64(fields.price, "price")?)
            .bind(quantity_to_i32(fields.stock, "stock")?)
            .bind(fields.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(quantity_to_i32(stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn toggle_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(TOGGLE_AVAILABILITY_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a product and drop it from every cart.
    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected > 0 {
            query(REMOVE_FROM_CARTS_SQL)
                .bind(product.into_uuid())
                .execute(&mut **tx)
                .await?;
        }

        Ok(rows_affected)
    }

    /// Take `quantity` units out of stock. Returns `false`, changing nothing,
    /// when stock does not cover it.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(quantity_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            origin: try_get_parsed(row, "origin")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_quantity(row, "stock")?,
            is_available: row.try_get("is_available")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
