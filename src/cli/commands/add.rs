//! Add listing command handler

use anyhow::Context;

use super::print_listing;
use crate::clients::{CatalogApi, HttpCatalogClient};
use crate::config::Config;
use crate::controller::{FormField, ListingForm};

/// Fills a form from `field=value` arguments.
pub fn parse_field_assignments(args: &[String]) -> anyhow::Result<ListingForm> {
    let mut form = ListingForm::default();

    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .with_context(|| format!("Expected field=value, got '{arg}'"))?;
        let field: FormField = name.trim().parse()?;
        form.set(field, value);
    }

    Ok(form)
}

pub async fn cmd_add_listing(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let fields = parse_field_assignments(args)?.to_new_listing()?;

    let client = HttpCatalogClient::from_config(&config.client)?;
    let created = client.insert(fields).await?;

    println!("Added listing:");
    print_listing(&created);

    Ok(())
}
