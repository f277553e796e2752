//! Category Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::categories::{
    data::{CategoryUpdate, NewCategory},
    records::{CategoryRecord, CategoryUuid},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    /// Number of live products in the category
    pub product_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            product_count: category.product_count,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub name: String,
    /// Derived from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,
}

impl CategoryRequest {
    pub(crate) fn into_new(self, uuid: CategoryUuid) -> NewCategory {
        NewCategory {
            uuid,
            name: self.name,
            slug: self.slug,
        }
    }
}

impl From<CategoryRequest> for CategoryUpdate {
    fn from(request: CategoryRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
        }
    }
}
