//! Larder Domain Concerns

pub mod carts;
pub mod categories;
pub mod deliveries;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod slugs;
pub mod sorting;
pub mod users;

mod rows;
