//! Object API request and response shapes.
//!
//! Requests are plain query strings: `/object?apikey=KEY&TERM=VALUE`.
//! Responses are JSON documents with an `info` block (paging) and a
//! `records` array.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::FeaturedItem;
use crate::{FeatureError, Result};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.harvardartmuseums.org";

/// Separator the API reads as OR inside a single query value.
const OR_SEPARATOR: &str = "|";

/// Payload returned by a search.
///
/// The feature panel forwards it untouched; only the preview reads it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SearchResult(pub Value);

impl SearchResult {
    /// Records on this page. Records that don't decode are logged and skipped.
    pub fn records(&self) -> Vec<FeaturedItem> {
        let Some(records) = self.0.get("records").and_then(Value::as_array) else {
            return Vec::new();
        };

        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                FeaturedItem::deserialize(record)
                    .map_err(|e| {
                        tracing::warn!(
                            index,
                            objectid = ?record.get("objectid"),
                            "Skipping undecodable record: {}",
                            e
                        );
                    })
                    .ok()
            })
            .collect()
    }

    /// Total number of matches across all pages.
    pub fn total_records(&self) -> u64 {
        self.info_u64("totalrecords")
    }

    /// Current page number (1-based), 0 if unknown.
    pub fn page(&self) -> u64 {
        self.info_u64("page")
    }

    /// Total page count, 0 if unknown.
    pub fn pages(&self) -> u64 {
        self.info_u64("pages")
    }

    /// URL of the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.info_str("next")
    }

    /// URL of the previous page, if any.
    pub fn prev_url(&self) -> Option<&str> {
        self.info_str("prev")
    }

    fn info_u64(&self, key: &str) -> u64 {
        self.0
            .pointer(&format!("/info/{}", key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    fn info_str(&self, key: &str) -> Option<&str> {
        self.0
            .pointer(&format!("/info/{}", key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Build the object query URL for a term/value pair.
///
/// Dashes in the value become the API's OR separator, so
/// `"Greek-Roman"` matches either culture.
///
/// # Errors
/// Returns error if `base_url` is not a valid URL.
pub fn object_query_url(base_url: &str, api_key: &str, term: &str, value: &str) -> Result<Url> {
    let endpoint = format!("{}/object", base_url.trim_end_matches('/'));
    let value = value.split('-').collect::<Vec<_>>().join(OR_SEPARATOR);

    Url::parse_with_params(&endpoint, &[("apikey", api_key), (term, value.as_str())])
        .map_err(|e| FeatureError::Search(format!("Invalid API URL {}: {}", endpoint, e)))
}
