//! List listings command handler

use super::print_listing;
use crate::clients::{CatalogApi, HttpCatalogClient};
use crate::config::Config;

pub async fn cmd_list_listings(config: &Config) -> anyhow::Result<()> {
    let client = HttpCatalogClient::from_config(&config.client)?;
    let listings = client.list().await?;

    if listings.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Add a listing with: mobilestore add brand=Apple \"model=iPhone 15\"");
        return Ok(());
    }

    println!("Catalog ({} total)", listings.len());
    println!("{:-<60}", "");

    for listing in &listings {
        print_listing(listing);
    }

    Ok(())
}
