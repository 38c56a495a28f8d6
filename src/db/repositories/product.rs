use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::domain::ListingId;
use crate::entities::{prelude::*, products};
use crate::models::listing::{Listing, NewListing};
use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::{debug, info};

const SEARCH_PAGE_SIZE: u64 = 200;

/// Repository for catalog listings
pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(m: products::Model) -> Listing {
        Listing {
            id: ListingId::new(m.id),
            fields: NewListing {
                brand: m.brand,
                model: m.model,
                storage: m.storage,
                ram: m.ram,
                screen_size: m.screen_size,
                camera: m.camera,
                processor: m.processor,
                battery: m.battery,
                price: m.price,
                color: m.color,
                availability: m.availability,
                rating: m.rating,
                reviews: m.reviews,
                image_url: m.image_url,
            },
        }
    }

    fn to_active_model(fields: &NewListing) -> products::ActiveModel {
        products::ActiveModel {
            brand: Set(fields.brand.clone()),
            model: Set(fields.model.clone()),
            storage: Set(fields.storage),
            ram: Set(fields.ram),
            screen_size: Set(fields.screen_size.clone()),
            camera: Set(fields.camera.clone()),
            processor: Set(fields.processor.clone()),
            battery: Set(fields.battery),
            price: Set(fields.price),
            color: Set(fields.color.clone()),
            availability: Set(fields.availability.clone()),
            rating: Set(fields.rating),
            reviews: Set(fields.reviews),
            image_url: Set(fields.image_url.clone()),
            ..Default::default()
        }
    }

    // ========================================================================
    // Listing Operations
    // ========================================================================

    pub async fn list_all(&self) -> Result<Vec<Listing>> {
        let rows = Products::find()
            .order_by_asc(products::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Inserts one row. The single INSERT either writes the whole record and
    /// yields its row id, or writes nothing.
    pub async fn insert(&self, fields: &NewListing) -> Result<Listing> {
        let model = Self::to_active_model(fields).insert(&self.conn).await?;
        info!(
            "Added listing {}: {} {}",
            model.id,
            model.brand.as_deref().unwrap_or_default(),
            model.model.as_deref().unwrap_or_default()
        );
        Ok(Self::map_model(model))
    }

    /// Literal, case-insensitive substring match over brand, model, processor
    /// and camera, in id order, capped at [`MAX_SEARCH_RESULTS`].
    ///
    /// SQLite `LIKE` only folds ASCII, so rows are scanned in pages and
    /// matched with Unicode lowercasing.
    pub async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        let needle = query.to_lowercase();
        let limit = usize::try_from(MAX_SEARCH_RESULTS).unwrap_or(usize::MAX);
        let mut matches = Vec::with_capacity(limit);

        let mut pages = Products::find()
            .order_by_asc(products::Column::Id)
            .paginate(&self.conn, SEARCH_PAGE_SIZE);

        while matches.len() < limit {
            let Some(rows) = pages.fetch_and_next().await? else {
                break;
            };
            let remaining = limit - matches.len();
            matches.extend(
                rows.into_iter()
                    .filter(|row| row_matches(row, &needle))
                    .take(remaining),
            );
        }

        debug!(query = %query, matches = matches.len(), "Listing search finished");
        Ok(matches.into_iter().map(Self::map_model).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Products::find().count(&self.conn).await?)
    }
}

/// `needle` must already be lowercased.
fn row_matches(row: &products::Model, needle: &str) -> bool {
    [&row.brand, &row.model, &row.processor, &row.camera]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(brand: &str, camera: Option<&str>) -> products::Model {
        products::Model {
            id: 1,
            brand: Some(brand.to_string()),
            model: None,
            storage: None,
            ram: None,
            screen_size: None,
            camera: camera.map(str::to_string),
            processor: None,
            battery: None,
            price: None,
            color: None,
            availability: None,
            rating: None,
            reviews: None,
            image_url: None,
        }
    }

    #[test]
    fn matching_folds_unicode_case() {
        assert!(row_matches(&row("Ökofon", None), "ökofon"));
        assert!(row_matches(&row("ÉCRAN", None), "écran"));
        assert!(!row_matches(&row("Okofon", None), "ökofon"));
    }

    #[test]
    fn pattern_characters_are_literal() {
        assert!(row_matches(&row("100% Phone", None), "%"));
        assert!(!row_matches(&row("Apple", None), "%"));
        assert!(!row_matches(&row("Apple", None), "a.*e"));
    }

    #[test]
    fn absent_columns_never_match() {
        assert!(row_matches(&row("Pixel", Some("50MP")), "50mp"));
        assert!(!row_matches(&row("Pixel", None), "50mp"));
    }
}
