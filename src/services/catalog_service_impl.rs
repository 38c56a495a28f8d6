//! `SeaORM` implementation of the `CatalogService` trait.

use crate::db::Store;
use crate::models::listing::{Listing, NewListing};
use crate::services::catalog_service::{CatalogError, CatalogService, effective_query};
use tracing::{error, warn};

/// SeaORM-backed [`CatalogService`].
pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list(&self) -> Result<Vec<Listing>, CatalogError> {
        self.store.list_products().await.map_err(|e| {
            error!("Error fetching products: {:#}", e);
            CatalogError::from(e)
        })
    }

    async fn insert(&self, fields: NewListing) -> Result<Listing, CatalogError> {
        self.store.add_product(&fields).await.map_err(|e| {
            error!("Error adding product: {:#}", e);
            CatalogError::from(e)
        })
    }

    async fn search(&self, query: Option<&str>) -> Result<Vec<Listing>, CatalogError> {
        let Some(query) = effective_query(query) else {
            return Ok(Vec::new());
        };

        self.store.search_products(query).await.map_err(|e| {
            warn!(query = %query, "Error searching products: {:#}", e);
            CatalogError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmCatalogService {
        SeaOrmCatalogService::new(Store::new("sqlite::memory:").await.unwrap())
    }

    fn iphone() -> NewListing {
        NewListing {
            brand: Some("Apple".to_string()),
            model: Some("iPhone 15".to_string()),
            processor: Some("A16".to_string()),
            camera: Some("48MP".to_string()),
            price: Some(79900.0),
            ..NewListing::default()
        }
    }

    #[tokio::test]
    async fn iphone_scenario() {
        let service = service().await;
        let created = service.insert(iphone()).await.unwrap();

        assert_eq!(service.search(Some("iphone")).await.unwrap(), vec![created]);
        assert!(service.search(Some("xyz")).await.unwrap().is_empty());
        assert!(service.search(Some("")).await.unwrap().is_empty());
        assert!(service.search(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn six_samsungs_yield_five_results() {
        let service = service().await;
        for i in 0..6 {
            service
                .insert(NewListing {
                    brand: Some("Samsung".to_string()),
                    model: Some(format!("Galaxy M{i}")),
                    ..NewListing::default()
                })
                .await
                .unwrap();
        }

        assert_eq!(service.search(Some("samsung")).await.unwrap().len(), 5);
        assert_eq!(service.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn inserted_listing_appears_in_list() {
        let service = service().await;
        let created = service.insert(iphone()).await.unwrap();

        let all = service.list().await.unwrap();
        assert!(all.iter().any(|l| l.id == created.id && l.fields == iphone()));
    }

    #[tokio::test]
    async fn closed_connection_reports_storage_unavailable() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.conn.clone().close().await.unwrap();
        let service = SeaOrmCatalogService::new(store);

        assert!(matches!(
            service.list().await,
            Err(CatalogError::StorageUnavailable(_))
        ));
        assert!(matches!(
            service.insert(iphone()).await,
            Err(CatalogError::StorageUnavailable(_))
        ));
        assert!(matches!(
            service.search(Some("apple")).await,
            Err(CatalogError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn empty_query_skips_storage_entirely() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.conn.clone().close().await.unwrap();
        let service = SeaOrmCatalogService::new(store);

        assert!(service.search(Some("")).await.unwrap().is_empty());
    }
}
