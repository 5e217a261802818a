//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use masoro_core::define_id;
/// define_id!(TableId);
///
/// let table = TableId::new(5);
/// assert_eq!(table.as_i32(), 5);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }
    };
}

// Define standard entity IDs
define_id!(MenuItemId);

/// Order identifier in the `ORD001` form the kitchen prints on tickets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Build the id for the `n`-th order, zero-padded to three digits.
    #[must_use]
    pub fn from_seq(n: u32) -> Self {
        Self(format!("ORD{n:03}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_id_roundtrip() {
        let id = MenuItemId::new(7);
        assert_eq!(id.as_i32(), 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!("7".parse::<MenuItemId>().unwrap(), id);
    }

    #[test]
    fn test_order_id_from_seq() {
        assert_eq!(OrderId::from_seq(1).as_str(), "ORD001");
        assert_eq!(OrderId::from_seq(42).as_str(), "ORD042");
        assert_eq!(OrderId::from_seq(1234).as_str(), "ORD1234");
    }

    #[test]
    fn test_order_id_parses_back() {
        let id: OrderId = "ORD007".parse().unwrap();
        assert_eq!(id, OrderId::from_seq(7));
        assert_eq!(id.to_string(), "ORD007");
    }

    #[test]
    fn test_serde_transparent() {
        let id = MenuItemId::new(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");

        let order = OrderId::from_seq(2);
        assert_eq!(serde_json::to_string(&order).unwrap(), "\"ORD002\"");
    }
}
