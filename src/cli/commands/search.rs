use super::print_listing;
use crate::clients::{CatalogApi, HttpCatalogClient};
use crate::config::Config;

pub async fn cmd_search_listings(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let client = HttpCatalogClient::from_config(&config.client)?;
    let results = client.search(query).await?;

    if results.is_empty() {
        println!("No listings found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for listing in &results {
        print_listing(listing);
    }

    Ok(())
}
