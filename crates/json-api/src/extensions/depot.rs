//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use larder_app::auth::Identity;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// The caller resolved by the auth middleware.
    fn identity_or_401(&self) -> Result<Identity, ApiError>;

    fn insert_identity(&mut self, identity: Identity);
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn identity_or_401(&self) -> Result<Identity, ApiError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("Authentication credentials were not provided"))
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }
}
