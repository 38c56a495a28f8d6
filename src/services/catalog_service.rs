//! Domain service for the listing catalog.
//!
//! Handlers talk to the catalog only through [`CatalogService`], so the HTTP
//! layer never sees storage types.

use crate::models::listing::{Listing, NewListing};
use thiserror::Error;

/// The only failure the catalog distinguishes. The payload is diagnostic
/// detail for logs and is never shown to API callers.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::StorageUnavailable(format!("{err:#}"))
    }
}

/// Catalog operations exposed to the API layer.
///
/// # Examples
///
/// ```rust,ignore
/// use mobilestore::services::{CatalogError, CatalogService};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn CatalogService>) -> Result<(), CatalogError> {
///     let suggestions = service.search(Some("pixel")).await?;
///     assert!(suggestions.len() <= 5);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns every listing in store order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StorageUnavailable`] on storage faults.
    async fn list(&self) -> Result<Vec<Listing>, CatalogError>;

    /// Stores a new listing and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StorageUnavailable`] if nothing could be written.
    async fn insert(&self, fields: NewListing) -> Result<Listing, CatalogError>;

    /// Literal case-insensitive substring search over brand, model,
    /// processor and camera. At most five results; an empty or absent query
    /// yields no results.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StorageUnavailable`] on storage faults.
    async fn search(&self, query: Option<&str>) -> Result<Vec<Listing>, CatalogError>;
}

/// Returns the query to run, or `None` when the search should short-circuit
/// to an empty result. Whitespace is significant.
#[must_use]
pub fn effective_query(query: Option<&str>) -> Option<&str> {
    query.filter(|q| !q.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_absent_queries_short_circuit() {
        assert_eq!(effective_query(None), None);
        assert_eq!(effective_query(Some("")), None);
    }

    #[test]
    fn whitespace_queries_are_searched() {
        assert_eq!(effective_query(Some(" ")), Some(" "));
        assert_eq!(effective_query(Some("pixel")), Some("pixel"));
    }

    #[test]
    fn storage_errors_display_their_detail() {
        let err: CatalogError = sea_orm::DbErr::Custom("disk full".to_string()).into();
        let message = err.to_string();
        assert!(message.starts_with("Storage unavailable: "));
        assert!(message.contains("disk full"));
    }
}
