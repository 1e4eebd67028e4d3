//! Identifier types for routes and stops.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::de::string_or_number;

/// A route identifier as issued by the transit backend.
///
/// The backend is not consistent about whether identifiers are JSON strings
/// or numbers, so deserialization accepts both and stores the textual form.
///
/// # Examples
///
/// ```
/// use transit_client::domain::RouteId;
///
/// let id: RouteId = serde_json::from_str("\"6\"").unwrap();
/// let numeric: RouteId = serde_json::from_str("6").unwrap();
/// assert_eq!(id, numeric);
/// assert_eq!(id.as_str(), "6");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(String);

/// A stop identifier as issued by the transit backend.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                string_or_number(deserializer).map(Self)
            }
        }
    };
}

string_id!(RouteId);
string_id!(StopId);
