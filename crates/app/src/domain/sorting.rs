//! List ordering parameters.
//!
//! Orderings are parsed from `field` / `-field` strings and rendered into SQL
//! only through a closed set of column names, never from caller input.

use std::str::FromStr;

use thiserror::Error;

/// A sortable field of some listing.
pub trait SortField: Copy {
    /// Parse the public field name.
    fn parse(name: &str) -> Option<Self>;

    /// Fully qualified SQL column for this field.
    fn column(self) -> &'static str;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A field and direction to order a listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: Direction,
}

/// Returned for an ordering naming an unsupported field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported ordering `{0}`")]
pub struct UnknownSortField(pub String);

impl<F: SortField> Sort<F> {
    #[must_use]
    pub const fn ascending(field: F) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    #[must_use]
    pub const fn descending(field: F) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    /// Render as an `ORDER BY` clause body.
    #[must_use]
    pub fn order_by(&self) -> String {
        let direction = match self.direction {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };

        format!("{} {direction}", self.field.column())
    }
}

impl<F: SortField> FromStr for Sort<F> {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let (name, direction) = match value.strip_prefix('-') {
            Some(name) => (name, Direction::Descending),
            None => (value, Direction::Ascending),
        };

        F::parse(name)
            .map(|field| Self { field, direction })
            .ok_or_else(|| UnknownSortField(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Price,
    }

    impl SortField for Field {
        fn parse(name: &str) -> Option<Self> {
            match name {
                "name" => Some(Self::Name),
                "price" => Some(Self::Price),
                _ => None,
            }
        }

        fn column(self) -> &'static str {
            match self {
                Self::Name => "t.name",
                Self::Price => "t.price",
            }
        }
    }

    #[test]
    fn parses_ascending_field() {
        assert_eq!("name".parse::<Sort<Field>>(), Ok(Sort::ascending(Field::Name)));
    }

    #[test]
    fn dash_prefix_means_descending() {
        assert_eq!(
            "-price".parse::<Sort<Field>>(),
            Ok(Sort::descending(Field::Price))
        );
    }

    #[test]
    fn rejects_unknown_field() {
        let result = "-drop table".parse::<Sort<Field>>();

        assert_eq!(result, Err(UnknownSortField("-drop table".to_string())));
    }

    #[test]
    fn renders_order_by_from_column_name() {
        assert_eq!(Sort::descending(Field::Price).order_by(), "t.price DESC");
    }
}
