//! Orders Data

use thiserror::Error;

use crate::domain::{
    carts::records::CartUuid,
    orders::{
        lifecycle::OrderStatus,
        records::{OrderUuid, PaymentMethod},
    },
    sorting::{Sort, SortField},
};

/// Country used when the caller leaves it blank.
pub const DEFAULT_COUNTRY: &str = "France";

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("delivery address must be at least 10 characters")]
    Address,

    #[error("city must be at least 2 characters")]
    City,

    #[error("postal code must be at least 4 characters")]
    PostalCode,

    #[error("phone number must be at least 8 characters")]
    Phone,
}

impl DeliveryAddress {
    /// Trim every field and check minimum lengths.
    ///
    /// # Errors
    ///
    /// Returns the first field that is too short.
    pub fn validated(self) -> Result<Self, AddressError> {
        fn long_enough(value: &str, min: usize) -> bool {
            value.chars().count() >= min
        }

        let address = self.address.trim().to_string();
        let city = self.city.trim().to_string();
        let postal_code = self.postal_code.trim().to_string();
        let phone = self.phone.trim().to_string();
        let country = match self.country.trim() {
            "" => DEFAULT_COUNTRY.to_string(),
            country => country.to_string(),
        };

        if !long_enough(&address, 10) {
            return Err(AddressError::Address);
        }

        if !long_enough(&city, 2) {
            return Err(AddressError::City);
        }

        if !long_enough(&postal_code, 4) {
            return Err(AddressError::PostalCode);
        }

        if !long_enough(&phone, 8) {
            return Err(AddressError::Phone);
        }

        Ok(Self {
            address,
            city,
            postal_code,
            country,
            phone,
        })
    }
}

/// Checkout request: turn the given active cart into an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub cart: CartUuid,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryAddress,
    pub shipping_cost: u64,
}

/// Administrative status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    CreatedAt,
    TotalAmount,
    OrderNumber,
}

impl SortField for OrderSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "total_amount" => Some(Self::TotalAmount),
            "order_number" => Some(Self::OrderNumber),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "o.created_at",
            Self::TotalAmount => "o.total_amount",
            Self::OrderNumber => "o.order_number",
        }
    }
}

/// Order listing filter, always scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<bool>,
    pub sort: Sort<OrderSortField>,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            payment_method: None,
            payment_status: None,
            sort: Sort::descending(OrderSortField::CreatedAt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            address: "  12 rue des Lilas ".to_string(),
            city: "Lyon".to_string(),
            postal_code: "69001".to_string(),
            country: String::new(),
            phone: "0601020304".to_string(),
        }
    }

    #[test]
    fn validated_trims_and_defaults_country() {
        let validated = address().validated();

        assert_eq!(
            validated.as_ref().map(|a| (a.address.as_str(), a.country.as_str())),
            Ok(("12 rue des Lilas", "France"))
        );
    }

    #[test]
    fn validated_reports_first_short_field() {
        let mut short_address = address();
        short_address.address = "  12 rue  ".to_string();

        assert_eq!(short_address.validated(), Err(AddressError::Address));

        let mut short_postal_code = address();
        short_postal_code.postal_code = "690".to_string();

        assert_eq!(short_postal_code.validated(), Err(AddressError::PostalCode));

        let mut short_phone = address();
        short_phone.phone = "0601".to_string();

        assert_eq!(short_phone.validated(), Err(AddressError::Phone));
    }
}
