//! Collection object types as returned by the museum object API.
//!
//! Every field is optional: records in the collection are sparse, and a
//! missing fact is simply not shown.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A collection object selected for the feature panel.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FeaturedItem {
    /// API object id, used to key preview rows
    #[serde(deserialize_with = "lenient_id")]
    pub objectid: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Human-readable date ("c. 1890", "5th century BCE")
    #[serde(deserialize_with = "lenient_text")]
    pub dated: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub technique: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub medium: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub dimensions: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub division: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub creditline: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub primaryimageurl: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub culture: Option<String>,
    pub images: Option<Vec<Image>>,
    pub people: Option<Vec<Person>>,
}

/// One image attached to an object.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "id_or_zero")]
    pub imageid: i64,
    #[serde(deserialize_with = "lenient_text")]
    pub baseimageurl: Option<String>,
}

/// A person associated with an object (artist, maker, publisher...).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "id_or_zero")]
    pub personid: i64,
    #[serde(deserialize_with = "text_or_empty")]
    pub displayname: String,
}

/// Text field that may arrive as null, a number or a string.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Numeric id that may arrive as null or as a numeric string.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

fn id_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(lenient_id(deserializer)?.unwrap_or_default())
}

/// Returns the field's text if it is present and non-empty.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("Greek".to_string())), Some("Greek"));
    }

    #[test]
    fn test_featured_item_from_api_record() {
        let json = r#"{
            "objectid": 299843,
            "title": "Self-Portrait Dedicated to Paul Gauguin",
            "dated": "1888",
            "culture": "Dutch",
            "medium": "Oil on canvas",
            "accessionyear": 1951,
            "primaryimageurl": null,
            "people": [{"personid": 21519, "displayname": "Vincent van Gogh", "role": "Artist"}],
            "images": [{"imageid": 47452, "baseimageurl": "https://nrs.harvard.edu/urn-3:HUAM:DDC251942_dynmc"}]
        }"#;

        let item: FeaturedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.objectid, Some(299843));
        assert_eq!(item.culture.as_deref(), Some("Dutch"));
        assert_eq!(item.primaryimageurl, None);
        assert!(item.description.is_none());

        let people = item.people.unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].displayname, "Vincent van Gogh");

        let images = item.images.unwrap();
        assert_eq!(images[0].imageid, 47452);
    }

    #[test]
    fn test_nulls_and_numbers_in_record() {
        let json = r#"{
            "objectid": "12",
            "dated": 1900,
            "title": null,
            "people": [{"personid": null, "displayname": null}],
            "images": [{"imageid": null, "baseimageurl": "u"}]
        }"#;

        let item: FeaturedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.objectid, Some(12));
        assert_eq!(item.dated.as_deref(), Some("1900"));
        assert_eq!(item.title, None);

        let people = item.people.unwrap();
        assert_eq!(people[0].personid, 0);
        assert_eq!(people[0].displayname, "");

        let images = item.images.unwrap();
        assert_eq!(images[0].imageid, 0);
        assert_eq!(images[0].baseimageurl.as_deref(), Some("u"));
    }

    #[test]
    fn test_empty_record() {
        let item: FeaturedItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item, FeaturedItem::default());
    }
}
