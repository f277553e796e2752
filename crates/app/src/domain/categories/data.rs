//! Categories Data

use crate::domain::{
    categories::records::CategoryUuid,
    sorting::{Sort, SortField},
};

/// New Category Data. The slug is derived from the name when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: Option<String>,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortField {
    Name,
    CreatedAt,
}

impl SortField for CategorySortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "c.name",
            Self::CreatedAt => "c.created_at",
        }
    }
}

/// Category listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub search: Option<String>,
    pub sort: Sort<CategorySortField>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            search: None,
            sort: Sort::ascending(CategorySortField::Name),
        }
    }
}
