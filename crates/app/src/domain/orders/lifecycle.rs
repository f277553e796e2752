//! Order status lifecycle.
//!
//! Every status change goes through [`transition`], whether it comes from the
//! customer, from staff or from a delivery update.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        Self::ALL.into_iter().all(|to| transition(self, to).is_err())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// Timestamp column stamped on entering a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Confirmed,
    Shipped,
    Delivered,
}

impl Milestone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

/// An accepted status change and its side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub milestone: Option<Milestone>,
    pub restores_stock: bool,
}

impl Transition {
    /// History comment used when the caller gives none.
    #[must_use]
    pub fn default_comment(&self) -> String {
        format!("Status changed from {} to {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move an order from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Check a status change against the lifecycle table.
///
/// # Errors
///
/// Returns [`InvalidTransition`] for any change the table does not allow,
/// including staying in the same status.
pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<Transition, InvalidTransition> {
    use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Processing, Shipped};

    let allowed = matches!(
        (from, to),
        (Pending, Confirmed | Cancelled)
            | (Confirmed, Processing | Cancelled)
            | (Processing, Shipped | Delivered | Cancelled)
            | (Shipped, Delivered)
    );

    if !allowed {
        return Err(InvalidTransition { from, to });
    }

    let milestone = match to {
        Confirmed => Some(Milestone::Confirmed),
        Shipped => Some(Milestone::Shipped),
        Delivered => Some(Milestone::Delivered),
        Pending | Processing | Cancelled => None,
    };

    Ok(Transition {
        from,
        to,
        milestone,
        restores_stock: to == Cancelled,
    })
}
