//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Where a product comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductOrigin {
    #[default]
    Local,
    Imported,
    Organic,
    Conventional,
    FairTrade,
}

impl ProductOrigin {
    pub const ALL: [Self; 5] = [
        Self::Local,
        Self::Imported,
        Self::Organic,
        Self::Conventional,
        Self::FairTrade,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Imported => "imported",
            Self::Organic => "organic",
            Self::Conventional => "conventional",
            Self::FairTrade => "fair_trade",
        }
    }
}

impl fmt::Display for ProductOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product origin `{0}`")]
pub struct UnknownProductOrigin(pub String);

impl FromStr for ProductOrigin {
    type Err = UnknownProductOrigin;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str() == value)
            .ok_or_else(|| UnknownProductOrigin(value.to_string()))
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub origin: ProductOrigin,
    pub price: u64,
    pub stock: u32,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Why a product cannot be bought in some quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unpurchasable {
    #[error("product is not available")]
    NotAvailable,

    #[error("only {available} left in stock")]
    InsufficientStock { available: u32 },
}

impl ProductRecord {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check that `quantity` units can be sold right now.
    ///
    /// # Errors
    ///
    /// Returns [`Unpurchasable`] for a deleted or unavailable product, or when
    /// stock does not cover the quantity.
    pub fn ensure_purchasable(&self, quantity: u32) -> Result<(), Unpurchasable> {
        if self.deleted_at.is_some() || !self.is_available {
            return Err(Unpurchasable::NotAvailable);
        }

        if quantity > self.stock {
            return Err(Unpurchasable::InsufficientStock {
                available: self.stock,
            });
        }

        Ok(())
    }
}
