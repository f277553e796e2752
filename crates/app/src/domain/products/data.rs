//! Products Data

use crate::domain::{
    categories::records::CategoryUuid,
    products::records::{ProductOrigin, ProductUuid},
    sorting::{Sort, SortField},
};

/// Stock level at or below which a product counts as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category: CategoryUuid,
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub origin: ProductOrigin,
    pub price: u64,
    pub stock: u32,
    pub is_available: bool,
}

/// Product Update Data. Replaces every editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub category: CategoryUuid,
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub origin: ProductOrigin,
    pub price: u64,
    pub stock: u32,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Name,
    Price,
    Stock,
    CreatedAt,
}

impl SortField for ProductSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "stock" => Some(Self::Stock),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::Stock => "p.stock",
            Self::CreatedAt => "p.created_at",
        }
    }
}

/// Product listing filter. Only live products are ever listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
    pub is_available: Option<bool>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub in_stock: bool,
    pub search: Option<String>,
    pub sort: Sort<ProductSortField>,
}

impl ProductFilter {
    /// Products that can be put in a cart right now.
    #[must_use]
    pub fn available() -> Self {
        Self {
            is_available: Some(true),
            in_stock: true,
            ..Self::default()
        }
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            is_available: None,
            min_price: None,
            max_price: None,
            in_stock: false,
            search: None,
            sort: Sort::descending(ProductSortField::CreatedAt),
        }
    }
}
