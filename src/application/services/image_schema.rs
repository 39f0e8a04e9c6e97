//! Validation of provider entries into feed records.

use serde_json::Value;

use crate::application::dto::{RawImage, RawUrls};
use crate::domain::entities::{ImageLocation, ImageRecord, ImageUrls, ImageUser};
use crate::domain::errors::SchemaError;

/// Parses and validates one provider entry.
///
/// # Errors
/// Returns `SchemaError` if the entry is not an object of the expected
/// shape, or lacks the id or any of the four required URLs.
pub fn normalize(raw: Value) -> Result<ImageRecord, SchemaError> {
    let raw: RawImage =
        serde_json::from_value(raw).map_err(|e| SchemaError::Malformed(e.to_string()))?;
    normalize_raw(raw)
}

/// Validates an already-deserialized provider entry.
///
/// Comments always start empty and a missing like count becomes zero.
///
/// # Errors
/// Returns `SchemaError` if the id or a required URL is missing or blank.
pub fn normalize_raw(raw: RawImage) -> Result<ImageRecord, SchemaError> {
    let id = required(raw.id, "id")?;
    let urls = raw.urls.ok_or(SchemaError::MissingField("urls"))?;
    let urls = normalize_urls(urls)?;

    let user = ImageUser {
        username: raw.user.and_then(|u| u.username).unwrap_or_default(),
    };
    let location = ImageLocation {
        country: raw
            .location
            .and_then(|l| l.country)
            .filter(|c| !c.trim().is_empty()),
    };

    Ok(ImageRecord::new(
        id,
        urls,
        user,
        location,
        raw.alt_description.unwrap_or_default(),
        raw.likes.unwrap_or(0),
    ))
}

fn normalize_urls(urls: RawUrls) -> Result<ImageUrls, SchemaError> {
    Ok(ImageUrls {
        thumb: required(urls.thumb, "urls.thumb")?,
        raw: required(urls.raw, "urls.raw")?,
        full: required(urls.full, "urls.full")?,
        regular: required(urls.regular, "urls.regular")?,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, SchemaError> {
    match value {
        None => Err(SchemaError::MissingField(field)),
        Some(v) if v.trim().is_empty() => Err(SchemaError::EmptyField(field)),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::raw_photo;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_normalizes_provider_object() {
        let record = normalize(raw_photo("Dwu85P9SOIk", 42)).unwrap();

        assert_eq!(record.id().as_str(), "Dwu85P9SOIk");
        assert_eq!(record.likes(), 42);
        assert_eq!(record.username(), "user_Dwu85P9SOIk");
        assert_eq!(record.urls().thumb, "https://images.example/Dwu85P9SOIk?w=200");
        assert_eq!(record.country(), None);
        assert!(record.comments().is_empty());
    }

    #[test]
    fn test_likes_default_to_zero() {
        let mut raw = raw_photo("a", 7);
        raw.as_object_mut().unwrap().remove("likes");

        assert_eq!(normalize(raw).unwrap().likes(), 0);
    }

    #[test]
    fn test_keeps_country_when_present() {
        let mut raw = raw_photo("a", 1);
        raw["location"] = json!({"country": "Iceland"});

        assert_eq!(normalize(raw).unwrap().country(), Some("Iceland"));
    }

    #[test]
    fn test_null_location_and_user_are_tolerated() {
        let mut raw = raw_photo("a", 1);
        raw["location"] = Value::Null;
        raw["user"] = Value::Null;
        raw["alt_description"] = Value::Null;

        let record = normalize(raw).unwrap();
        assert_eq!(record.username(), "");
        assert_eq!(record.alt_description(), "");
    }

    #[test_case("id" ; "id")]
    #[test_case("urls" ; "urls")]
    fn test_rejects_missing_top_level_field(field: &'static str) {
        let mut raw = raw_photo("a", 1);
        raw.as_object_mut().unwrap().remove(field);

        assert_eq!(normalize(raw), Err(SchemaError::MissingField(field)));
    }

    #[test_case("thumb" ; "thumb")]
    #[test_case("raw" ; "raw")]
    #[test_case("full" ; "full")]
    #[test_case("regular" ; "regular")]
    fn test_rejects_missing_url(which: &str) {
        let mut raw = raw_photo("a", 1);
        raw["urls"].as_object_mut().unwrap().remove(which);

        assert!(matches!(
            normalize(raw),
            Err(SchemaError::MissingField(field)) if field == format!("urls.{which}")
        ));
    }

    #[test]
    fn test_rejects_blank_id() {
        let mut raw = raw_photo("a", 1);
        raw["id"] = json!("  ");

        assert_eq!(normalize(raw), Err(SchemaError::EmptyField("id")));
    }

    #[test_case(json!("not an object") ; "string")]
    #[test_case(json!({"id": "a", "likes": -3}) ; "negative_likes")]
    #[test_case(json!({"id": 12, "urls": {}}) ; "numeric_id")]
    fn test_rejects_malformed_entries(raw: Value) {
        assert!(matches!(normalize(raw), Err(SchemaError::Malformed(_))));
    }
}
