//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductOrigin, ProductRecord, ProductUuid},
    },
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{invalid_price, invalid_stock},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub category_name: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// One of `local`, `imported`, `organic`, `conventional`, `fair_trade`
    pub origin: String,
    /// Unit price in cents
    pub price: u64,
    pub stock: u32,
    pub is_available: bool,
    pub in_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            category_uuid: product.category_uuid.into(),
            in_stock: product.in_stock(),
            category_name: product.category_name,
            name: product.name,
            slug: product.slug,
            description: product.description,
            origin: product.origin.to_string(),
            price: product.price,
            stock: product.stock,
            is_available: product.is_available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Editable product fields, used both to create and to replace a product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub category: Uuid,
    pub name: String,
    /// Derived from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub origin: Option<String>,
    /// Unit price in cents
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

const fn available_by_default() -> bool {
    true
}

impl ProductRequest {
    pub(crate) fn into_update(self) -> Result<ProductUpdate, ApiError> {
        let origin = self
            .origin
            .as_deref()
            .map(str::parse::<ProductOrigin>)
            .transpose()
            .or_400("invalid_origin", "Unknown product origin")?
            .unwrap_or_default();

        let price = u64::try_from(self.price).map_err(|_negative| invalid_price())?;
        let stock = u32::try_from(self.stock).map_err(|_out_of_range| invalid_stock())?;

        Ok(ProductUpdate {
            category: CategoryUuid::from_uuid(self.category),
            name: self.name,
            slug: self.slug,
            description: self.description,
            origin,
            price,
            stock,
            is_available: self.is_available,
        })
    }

    pub(crate) fn into_new(self, uuid: ProductUuid) -> Result<NewProduct, ApiError> {
        let fields = self.into_update()?;

        Ok(NewProduct {
            uuid,
            category: fields.category,
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            origin: fields.origin,
            price: fields.price,
            stock: fields.stock,
            is_available: fields.is_available,
        })
    }
}
