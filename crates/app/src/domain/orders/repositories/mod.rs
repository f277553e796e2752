//! Order Repositories

mod history;
mod items;
mod orders;

pub(crate) use history::PgOrderHistoryRepository;
pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::{OrderHeader, OrderListing, PgOrdersRepository};
