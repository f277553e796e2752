//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, JwtSettings, PgAuthService, TokenError, TokenIssuer},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        deliveries::{DeliveriesService, PgDeliveriesService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid token settings")]
    Token(#[source] TokenError),
}

/// Every service the HTTP layer talks to.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub deliveries: Arc<dyn DeliveriesService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// token settings are unusable.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        jwt: &JwtSettings,
    ) -> Result<Self, AppInitError> {
        let tokens = TokenIssuer::new(jwt).map_err(AppInitError::Token)?;

        let pool = database::connect_with(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), tokens))
    }

    #[must_use]
    pub fn from_db(db: Db, tokens: TokenIssuer) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens)),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            deliveries: Arc::new(PgDeliveriesService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db)),
        }
    }
}
