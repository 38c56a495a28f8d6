//! Domain primitives for the catalog.
//!
//! Identities are minted by the store on insert and never constructed from
//! caller input on the write path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a [`Listing`](crate::models::listing::Listing).
///
/// Wraps the SQLite row id so listing ids cannot be confused with other
/// integers such as storage sizes or review counts.
///
/// # Examples
///
/// ```rust
/// use mobilestore::domain::ListingId;
///
/// let id = ListingId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ListingId(i64);

impl ListingId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ListingId> for i64 {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

impl From<i64> for ListingId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl Serialize for ListingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}
