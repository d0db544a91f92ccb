//! Integer identifiers backed by SQLite rowids

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw row id
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(
    /// A user: owner of containers and applications
    UserId
);
define_id!(
    /// A board or a service
    ContainerId
);
define_id!(
    /// A list or a stage
    LaneId
);
define_id!(
    /// An application (the placed item)
    ItemId
);
define_id!(
    /// A timeline event
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_integer() {
        let id = ItemId::new(42);
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(42));
        let back: ItemId = serde_json::from_value(serde_json::json!(42)).unwrap();
        assert_eq!(back, id);
        assert_eq!(id.to_string(), "42");
    }
}
