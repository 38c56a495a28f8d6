use crate::constants::timeouts;
use crate::models::listing::{Listing, NewListing};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every connection to `:memory:` opens its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(timeouts::DB_CONNECT)
            .acquire_timeout(timeouts::DB_ACQUIRE)
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    pub async fn list_products(&self) -> Result<Vec<Listing>> {
        self.product_repo().list_all().await
    }

    pub async fn add_product(&self, fields: &NewListing) -> Result<Listing> {
        self.product_repo().insert(fields).await
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<Listing>> {
        self.product_repo().search(query).await
    }

    pub async fn product_count(&self) -> Result<u64> {
        self.product_repo().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_SCAN_ROWS: usize = 650;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn listing(brand: &str, model: &str, processor: &str, camera: &str) -> NewListing {
        NewListing {
            brand: Some(brand.to_string()),
            model: Some(model.to_string()),
            processor: Some(processor.to_string()),
            camera: Some(camera.to_string()),
            ..NewListing::default()
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids_and_list_returns_insertion_order() {
        let store = memory_store().await;

        let first = store
            .add_product(&listing("Apple", "iPhone 15", "A16", "48MP"))
            .await
            .unwrap();
        let second = store
            .add_product(&listing("Apple", "iPhone 15", "A16", "48MP"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);

        let all = store.list_products().await.unwrap();
        assert_eq!(all, vec![first, second]);
        assert_eq!(store.product_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn insert_round_trips_every_field() {
        let store = memory_store().await;
        let fields = NewListing {
            brand: Some("OnePlus".to_string()),
            model: Some("12".to_string()),
            storage: Some(256),
            ram: Some(12),
            screen_size: Some("6.82 inches".to_string()),
            camera: Some("50MP".to_string()),
            processor: Some("Snapdragon 8 Gen 3".to_string()),
            battery: Some(5400),
            price: Some(64999.0),
            color: Some("Flowy Emerald".to_string()),
            availability: Some("In Stock".to_string()),
            rating: Some(4.5),
            reviews: Some(1200),
            image_url: Some("https://example.com/op12.png".to_string()),
        };

        let created = store.add_product(&fields).await.unwrap();
        assert_eq!(created.fields, fields);

        let all = store.list_products().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].fields, fields);
        assert_eq!(all[0].id, created.id);
    }

    #[tokio::test]
    async fn search_matches_any_of_four_fields_case_insensitively() {
        let store = memory_store().await;
        store
            .add_product(&listing("Apple", "iPhone 15", "A16", "48MP"))
            .await
            .unwrap();
        store
            .add_product(&listing("Google", "Pixel 8", "Tensor G3", "50MP"))
            .await
            .unwrap();
        store
            .add_product(&listing("Xiaomi", "14", "Snapdragon", "50MP Leica"))
            .await
            .unwrap();

        let by_model = store.search_products("iphone").await.unwrap();
        assert_eq!(by_model.len(), 1);
        assert_eq!(by_model[0].fields.brand.as_deref(), Some("Apple"));

        assert_eq!(store.search_products("GOOGLE").await.unwrap().len(), 1);
        assert_eq!(store.search_products("tensor").await.unwrap().len(), 1);
        assert_eq!(store.search_products("50mp").await.unwrap().len(), 2);
        assert!(store.search_products("xyz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let store = memory_store().await;
        store
            .add_product(&listing("Ökofon", "Écran X", "Ärm", "Ünit"))
            .await
            .unwrap();

        assert_eq!(store.search_products("ökofon").await.unwrap().len(), 1);
        assert_eq!(store.search_products("ÖKOFON").await.unwrap().len(), 1);
        assert_eq!(store.search_products("écran").await.unwrap().len(), 1);
        assert_eq!(store.search_products("ärm").await.unwrap().len(), 1);
        assert!(store.search_products("okofon").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_cap_applies_across_pages() {
        let store = memory_store().await;
        for i in 0..SEARCH_SCAN_ROWS {
            let brand = if i % 100 == 99 { "Nokia" } else { "Samsung" };
            store
                .add_product(&listing(brand, &format!("Model {i}"), "Chip", "12MP"))
                .await
                .unwrap();
        }

        let results = store.search_products("nokia").await.unwrap();
        let models: Vec<_> = results
            .iter()
            .map(|l| l.fields.model.clone().unwrap())
            .collect();
        assert_eq!(
            models,
            vec!["Model 99", "Model 199", "Model 299", "Model 399", "Model 499"]
        );
    }

    #[tokio::test]
    async fn search_is_capped_at_five_in_store_order() {
        let store = memory_store().await;
        let mut ids = Vec::new();
        for i in 0..6 {
            let created = store
                .add_product(&listing("Samsung", &format!("Galaxy A{i}"), "Exynos", "50MP"))
                .await
                .unwrap();
            ids.push(created.id);
        }

        let results = store.search_products("samsung").await.unwrap();
        assert_eq!(results.len(), 5);
        let result_ids: Vec<_> = results.iter().map(|l| l.id).collect();
        assert_eq!(result_ids, ids[..5]);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = memory_store().await;
        store
            .add_product(&listing("Apple", "iPhone 15", "A16", "48MP"))
            .await
            .unwrap();
        store
            .add_product(&listing("Nothing", "Phone_2", "Snapdragon", "50MP"))
            .await
            .unwrap();

        assert!(store.search_products("%").await.unwrap().is_empty());
        assert_eq!(store.search_products("_").await.unwrap().len(), 1);
        assert!(store.search_products("i.*15").await.unwrap().is_empty());
        assert!(store.search_products("(").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listings_with_absent_fields_are_never_matched_through_them() {
        let store = memory_store().await;
        store
            .add_product(&NewListing {
                brand: Some("Fairphone".to_string()),
                ..NewListing::default()
            })
            .await
            .unwrap();

        assert_eq!(store.search_products("fair").await.unwrap().len(), 1);
        assert!(store.search_products("gen").await.unwrap().is_empty());
    }
}
