use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::domain::ListingId;

/// Client-supplied listing fields. Every attribute may be absent.
///
/// Numeric attributes are coerced on the way in: JSON numbers, numeric
/// strings (as sent by HTML form inputs) and `null` are accepted. An empty
/// string means absent for every attribute. Anything else is a malformed
/// request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
    /// GB
    #[serde(default, deserialize_with = "lenient_int")]
    pub storage: Option<i64>,
    /// GB
    #[serde(default, deserialize_with = "lenient_int")]
    pub ram: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub screen_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub camera: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub processor: Option<String>,
    /// mAh
    #[serde(default, deserialize_with = "lenient_int")]
    pub battery: Option<i64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub availability: Option<String>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub reviews: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: ListingId,
    #[serde(flatten)]
    pub fields: NewListing,
}

impl Listing {
    /// Display label used by suggestions and grid cards: `"{brand} {model}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            self.fields.brand.as_deref().unwrap_or_default(),
            self.fields.model.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => None,
        Some(Loose::Text(s)) if s.is_empty() => None,
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Int(v)) => Some(v.to_string()),
        Some(Loose::Float(v)) => Some(v.to_string()),
    })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Int(v)) => Ok(Some(v)),
        Some(Loose::Float(v)) => integral(v).map(Some).ok_or_else(|| {
            de::Error::custom(format!("expected an integer, found {v}"))
        }),
        Some(Loose::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(v) = trimmed.parse::<i64>() {
                return Ok(Some(v));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(integral)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected an integer, found {s:?}")))
        }
    }
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        #[allow(clippy::cast_precision_loss)]
        Some(Loose::Int(v)) => Ok(Some(v as f64)),
        Some(Loose::Float(v)) => Ok(Some(v)),
        Some(Loose::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected a number, found {s:?}")))
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_strings_are_coerced_to_numbers() {
        let fields: NewListing = serde_json::from_value(json!({
            "brand": "Apple",
            "model": "iPhone 15",
            "storage": "128",
            "ram": "6",
            "battery": "3349",
            "price": "79900",
            "image_url": "https://example.com/iphone.png"
        }))
        .unwrap();

        assert_eq!(fields.storage, Some(128));
        assert_eq!(fields.ram, Some(6));
        assert_eq!(fields.battery, Some(3349));
        assert_eq!(fields.price, Some(79900.0));
        assert_eq!(fields.color, None);
    }

    #[test]
    fn missing_and_empty_fields_become_absent() {
        let fields: NewListing =
            serde_json::from_value(json!({ "brand": "Nokia", "storage": "", "color": "", "rating": null }))
                .unwrap();

        assert_eq!(fields.brand.as_deref(), Some("Nokia"));
        assert_eq!(fields.storage, None);
        assert_eq!(fields.rating, None);
        assert_eq!(fields.model, None);
        assert_eq!(fields.color, None);
    }

    #[test]
    fn negative_and_zero_values_are_accepted() {
        let fields: NewListing =
            serde_json::from_value(json!({ "price": -1, "ram": 0, "storage": 64.0 })).unwrap();

        assert_eq!(fields.price, Some(-1.0));
        assert_eq!(fields.ram, Some(0));
        assert_eq!(fields.storage, Some(64));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        assert!(serde_json::from_value::<NewListing>(json!({ "storage": "lots" })).is_err());
        assert!(serde_json::from_value::<NewListing>(json!({ "ram": 5.5 })).is_err());
        assert!(serde_json::from_value::<NewListing>(json!({ "price": "cheap" })).is_err());
    }

    #[test]
    fn listing_flattens_fields_next_to_id() {
        let listing = Listing {
            id: ListingId::new(3),
            fields: NewListing {
                brand: Some("Google".to_string()),
                model: Some("Pixel 8".to_string()),
                ..NewListing::default()
            },
        };

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["brand"], "Google");

        let back: Listing = serde_json::from_value(value).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn label_joins_brand_and_model() {
        let listing = Listing {
            id: ListingId::new(1),
            fields: NewListing {
                brand: Some("Samsung".to_string()),
                model: Some("Galaxy S24".to_string()),
                ..NewListing::default()
            },
        };
        assert_eq!(listing.label(), "Samsung Galaxy S24");
    }
}
