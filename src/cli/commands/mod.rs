mod add;
mod browse;
mod list;
mod search;

pub use add::{cmd_add_listing, parse_field_assignments};
pub use browse::cmd_browse;
pub use list::cmd_list_listings;
pub use search::cmd_search_listings;

use crate::models::listing::Listing;

fn print_listing(listing: &Listing) {
    let f = &listing.fields;
    println!("• {} (ID: {})", listing.label(), listing.id);

    let mut specs = Vec::new();
    if let Some(ram) = f.ram {
        specs.push(format!("{ram}GB RAM"));
    }
    if let Some(storage) = f.storage {
        specs.push(format!("{storage}GB Storage"));
    }
    if let Some(processor) = f.processor.as_deref() {
        specs.push(processor.to_string());
    }
    if let Some(camera) = f.camera.as_deref() {
        specs.push(format!("{camera} camera"));
    }
    if !specs.is_empty() {
        println!("  {}", specs.join(" • "));
    }

    if let Some(price) = f.price {
        println!("  ₹{price}");
    }
}
