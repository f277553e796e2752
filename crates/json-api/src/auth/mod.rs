//! Authentication

mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;
mod models;
pub(crate) mod staff;

pub(crate) use errors::*;
pub(crate) use models::*;
