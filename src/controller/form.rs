//! Values typed into the new-listing form.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::listing::NewListing;

#[derive(Debug, Error)]
#[error("Invalid listing form: {0}")]
pub struct FormError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Brand,
    Model,
    Storage,
    Ram,
    ScreenSize,
    Camera,
    Processor,
    Battery,
    Price,
    Color,
    Availability,
    Rating,
    Reviews,
    ImageUrl,
}

impl FormField {
    pub const ALL: [Self; 14] = [
        Self::Brand,
        Self::Model,
        Self::Storage,
        Self::Ram,
        Self::ScreenSize,
        Self::Camera,
        Self::Processor,
        Self::Battery,
        Self::Price,
        Self::Color,
        Self::Availability,
        Self::Rating,
        Self::Reviews,
        Self::ImageUrl,
    ];

    /// Wire name, identical to the JSON key of the listing attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Storage => "storage",
            Self::Ram => "ram",
            Self::ScreenSize => "screen_size",
            Self::Camera => "camera",
            Self::Processor => "processor",
            Self::Battery => "battery",
            Self::Price => "price",
            Self::Color => "color",
            Self::Availability => "availability",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::ImageUrl => "image_url",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError(format!("unknown field '{s}'")))
    }
}

/// Raw text per field, as an HTML form would hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    values: [String; 14],
}

impl ListingForm {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    /// Converts the typed text into listing fields using the same coercion
    /// the server applies: blank inputs become absent, numeric inputs must
    /// parse.
    pub fn to_new_listing(&self) -> Result<NewListing, FormError> {
        let map: Map<String, Value> = FormField::ALL
            .into_iter()
            .map(|field| {
                (
                    field.name().to_string(),
                    Value::String(self.get(field).to_string()),
                )
            })
            .collect();

        serde_json::from_value(Value::Object(map)).map_err(|e| FormError(e.to_string()))
    }
}
