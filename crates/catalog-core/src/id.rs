//! Typed ID wrappers for catalog entities.
//!
//! Every entity is keyed by a document-store object id, rendered as a
//! 24 character lowercase hexadecimal string.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Length of a hex-encoded object id.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Error returned when a string is not a valid object id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object id '{0}': expected {OBJECT_ID_HEX_LEN} hexadecimal characters")]
pub struct InvalidId(pub String);

/// Returns true if `s` is a hex-encoded object id.
#[must_use]
pub fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

macro_rules! object_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "64b7f0c2a1b2c3d4e5f60718"))]
        pub struct $name(String);

        impl $name {
            /// Parses an id, normalizing it to lowercase.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                if is_object_id(s) {
                    Ok(Self(s.to_ascii_lowercase()))
                } else {
                    Err(InvalidId(s.to_string()))
                }
            }

            /// Returns the hex representation.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

object_id_type!(
    /// A strongly-typed wrapper for product IDs.
    ProductId
);

object_id_type!(
    /// A strongly-typed wrapper for manufacturer IDs.
    ManufacturerId
);

object_id_type!(
    /// A strongly-typed wrapper for component IDs.
    ComponentId
);
