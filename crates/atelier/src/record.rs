//! Typed records delivered by the storefront endpoints.
//!
//! Records are decoded from the raw call result at the fetch boundary. Field
//! names follow the wire format of the storefront's `search_read` results;
//! unknown fields are ignored.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

/// Prefix of the data URI an encoded product image is served under.
pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A public product category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Display name. May be empty.
    pub name: String,
}

impl Category {
    /// Create a category record.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A product shown in the featured list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeaturedProduct {
    /// Display name.
    pub name: String,
    /// Encoded image, absent when the product has none.
    #[serde(rename = "image_512", default, deserialize_with = "deserialize_image")]
    pub image: Option<ImageData>,
}

impl FeaturedProduct {
    /// Create a featured product record.
    pub fn new(name: impl Into<String>, image: Option<ImageData>) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// A product shown in the latest-products carousel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestProduct {
    /// Display name.
    pub name: String,
    /// Encoded image, absent when the product has none.
    #[serde(rename = "image_512", default, deserialize_with = "deserialize_image")]
    pub image: Option<ImageData>,
    /// Storefront ordering value, shown for diagnostics only.
    #[serde(rename = "website_sequence")]
    pub sequence: Sequence,
}

impl LatestProduct {
    /// Create a latest product record.
    pub fn new(name: impl Into<String>, image: Option<ImageData>, sequence: i64) -> Self {
        Self {
            name: name.into(),
            image,
            sequence: Sequence::from(sequence),
        }
    }
}

/// Base64 text of a product image, as delivered by the backend.
///
/// The text is passed through untouched; it is never decoded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// Wrap encoded image text.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Image source attribute for an optional image: a data URI, with an empty
/// payload when the image is absent.
pub fn image_src(image: Option<&ImageData>) -> String {
    format!(
        "{IMAGE_DATA_URI_PREFIX}{}",
        image.map(ImageData::as_str).unwrap_or_default()
    )
}

/// The backend marks an empty binary field with `false`.
fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<ImageData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(ImageData(s))),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a base64 string, false or null",
        )),
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

/// A numeric ordering value, kept exactly as received.
///
/// Displays the way a browser prints a number: integral values without a
/// decimal point, exponent notation only below `1e-6` or from `1e21` up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Number);

impl Sequence {
    /// The value as an integer, when it is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }
}

impl From<i64> for Sequence {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_i64() || self.0.is_u64() {
            return fmt::Display::fmt(&self.0, f);
        }
        match self.0.as_f64() {
            Some(value) => f.write_str(&format_float(value)),
            None => fmt::Display::fmt(&self.0, f),
        }
    }
}

fn format_float(value: f64) -> String {
    if value == 0.0 {
        // Covers negative zero
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let scientific = format!("{value:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_ignores_extra_fields() {
        let category: Category = serde_json::from_value(json!({"id": 3, "name": "Shoes"})).unwrap();
        assert_eq!(category, Category::new("Shoes"));
    }

    #[test]
    fn category_requires_string_name() {
        assert!(serde_json::from_value::<Category>(json!({"id": 3})).is_err());
        assert!(serde_json::from_value::<Category>(json!({"name": 12})).is_err());
    }

    #[test]
    fn absent_image_forms() {
        for raw in [
            json!({"name": "Jacket", "image_512": false}),
            json!({"name": "Jacket", "image_512": null}),
            json!({"name": "Jacket", "image_512": ""}),
            json!({"name": "Jacket"}),
        ] {
            let product: FeaturedProduct = serde_json::from_value(raw).unwrap();
            assert_eq!(product.image, None);
        }
    }

    #[test]
    fn present_image_is_kept_verbatim() {
        let product: FeaturedProduct =
            serde_json::from_value(json!({"name": "Jacket", "image_512": "iVBORw0KGgo="})).unwrap();
        assert_eq!(product.image, Some(ImageData::new("iVBORw0KGgo=")));
        assert_eq!(image_src(product.image.as_ref()), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn wrong_image_type_is_rejected() {
        for raw in [
            json!({"name": "a", "image_512": true}),
            json!({"name": "a", "image_512": 5}),
        ] {
            assert!(serde_json::from_value::<FeaturedProduct>(raw).is_err());
        }
    }

    #[test]
    fn image_src_without_image() {
        assert_eq!(image_src(None), "data:image/png;base64,");
    }

    #[test]
    fn latest_product_sequence_displays_literally() {
        let product: LatestProduct = serde_json::from_value(json!({
            "name": "Coat",
            "image_512": false,
            "website_sequence": 3,
            "website_url": "/shop/coat"
        }))
        .unwrap();
        assert_eq!(product.sequence.to_string(), "3");
        assert_eq!(product.sequence.as_i64(), Some(3));

        let product: LatestProduct =
            serde_json::from_value(json!({"name": "Coat", "website_sequence": 2.5})).unwrap();
        assert_eq!(product.sequence.to_string(), "2.5");
    }

    #[test]
    fn float_sequence_displays_like_a_browser() {
        let cases = [
            (json!(3.0), "3"),
            (json!(-0.0), "0"),
            (json!(1e20), "100000000000000000000"),
            (json!(1e21), "1e+21"),
            (json!(1.5e-7), "1.5e-7"),
            (json!(0.000001), "0.000001"),
            (json!(-2.5), "-2.5"),
            (json!(18446744073709551615u64), "18446744073709551615"),
        ];
        for (raw, expected) in cases {
            let sequence: Sequence = serde_json::from_value(raw).unwrap();
            assert_eq!(sequence.to_string(), expected);
        }
    }

    #[test]
    fn latest_product_requires_sequence() {
        assert!(serde_json::from_value::<LatestProduct>(json!({"name": "Coat"})).is_err());
    }
}
