pub mod catalog;

pub use catalog::{CatalogApi, ClientError, HttpCatalogClient};
