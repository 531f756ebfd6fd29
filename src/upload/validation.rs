//
//  bcr-api
//  upload/validation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Validation of custom content before it is uploaded.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::common::ValidationErrors;

/// Maximum length of an item's contents, in characters.
pub const MAX_CONTENTS_LEN: usize = 16_384;

/// Maximum number of custom fields per item.
pub const MAX_CUSTOM_FIELDS: usize = 10;

/// Custom field keys must be shorter than this.
pub const MAX_CUSTOM_KEY_LEN: usize = 100;

/// Custom field values must be shorter than this.
pub const MAX_CUSTOM_VALUE_LEN: usize = 10_000;

/// Naive layouts tried after RFC 3339, interpreted as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EngagementType {
    Reply,
    Retweet,
    Comment,
}

/// Where an item was written.
///
/// Identified by a zipcode, a location id, or a latitude/longitude pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl Geolocation {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.latitude.is_some() != self.longitude.is_some() {
            errors.push("longitude", "Must specify both valid `latitude` and `longitude`");
        }

        let has_coordinates = self.latitude.is_some() || self.longitude.is_some();
        if is_blank(&self.zipcode) && is_blank(&self.id) && !has_coordinates {
            errors.push("zipcode", "Must specify zipcode, id, or latitude and longitude");
        }

        errors.into_result()
    }
}

/// One document of custom content.
///
/// Fields use the upload endpoint's names when (de)serialized. Required
/// fields default to empty so that a document missing them still parses and
/// [`validated`](Self::validated) can report every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadItem {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub contents: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_profile_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_type: Option<EngagementType>,
}

impl UploadItem {
    /// Checks every field and returns the item ready to send.
    ///
    /// The returned item has `date` normalised to RFC 3339 and `guid`
    /// filled from `url` when it was missing.
    pub fn validated(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require("title", &self.title);
        errors.require("author", &self.author);
        errors.require("contents", &self.contents);

        match self.language.chars().count() {
            0 => errors.push("language", "field required"),
            2 => {}
            n if n > 2 => errors.push("language", "ensure this value has at most 2 characters"),
            _ => errors.push("language", "ensure this value has at least 2 characters"),
        }

        if self.date.trim().is_empty() {
            errors.push("date", "field required");
        } else {
            match normalize_timestamp(&self.date) {
                Some(date) => self.date = date,
                None => errors.push(
                    "date",
                    format!(
                        "Could not validate format '{}'. Must be YYYY-MM-DD or iso-formatted time stamp",
                        self.date
                    ),
                ),
            }
        }

        if self.contents.chars().count() > MAX_CONTENTS_LEN {
            errors.push(
                "contents",
                format!("ensure this value has at most {} characters", MAX_CONTENTS_LEN),
            );
        }

        let url_ok = match &self.url {
            Some(url) if !is_http_url(url) => {
                errors.push("url", "invalid or missing URL scheme");
                false
            }
            Some(_) => true,
            None => false,
        };

        if is_blank(&self.guid) {
            if url_ok {
                self.guid = self.url.clone();
            } else if self.url.is_none() {
                errors.push("guid", "Must specify either valid `guid` or `url`");
            }
        }

        if let Some(geolocation) = &self.geolocation {
            if let Err(geo_errors) = geolocation.validate() {
                errors.extend_prefixed("geolocation", geo_errors);
            }
        }

        if let Some(custom) = &self.custom {
            if custom.len() > MAX_CUSTOM_FIELDS {
                errors.push(
                    "custom",
                    format!(
                        "{} custom fields found. Must not exceed {}.",
                        custom.len(),
                        MAX_CUSTOM_FIELDS
                    ),
                );
            } else if custom.iter().any(|(key, value)| {
                key.chars().count() >= MAX_CUSTOM_KEY_LEN
                    || value.chars().count() >= MAX_CUSTOM_VALUE_LEN
            }) {
                errors.push(
                    "custom",
                    "Could not validate custom field keys or values. keys must be less than 100 characters. values must be less than 10,000 characters",
                );
            }
        }

        errors.into_result()?;
        Ok(self)
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> Option<&str> {
        self.guid.as_deref().or(self.url.as_deref())
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Parses the timestamp layouts the upload endpoint accepts and returns it
/// as RFC 3339. Naive timestamps are taken as UTC.
pub fn normalize_timestamp(value: &str) -> Option<String> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.to_rfc3339_opts(SecondsFormat::AutoSi, false));
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, false));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

/// A validated, duplicate-free set of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadCollection {
    items: Vec<UploadItem>,
}

impl UploadCollection {
    /// Validates every item and rejects duplicate guids.
    ///
    /// Item errors are reported under `items[i]`, e.g. `items[3].date`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bcr_api::upload::{UploadCollection, UploadItem};
    ///
    /// let item = UploadItem {
    ///     title: "Survey response".into(),
    ///     author: "respondent-17".into(),
    ///     language: "en".into(),
    ///     date: "2024-05-02".into(),
    ///     contents: "Delivery was quick.".into(),
    ///     guid: Some("survey-17".into()),
    ///     ..Default::default()
    /// };
    ///
    /// let collection = UploadCollection::new(vec![item]).unwrap();
    /// assert_eq!(collection.items()[0].date, "2024-05-02T00:00:00+00:00");
    /// ```
    pub fn new(items: Vec<UploadItem>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            match item.validated() {
                Ok(item) => validated.push(item),
                Err(item_errors) => errors.extend_prefixed(&format!("items[{}]", index), item_errors),
            }
        }

        let duplicates = duplicate_keys(&validated);
        if !duplicates.is_empty() {
            let listed: Vec<String> = duplicates.iter().map(|g| format!("'{}'", g)).collect();
            errors.push(
                "items",
                format!("Duplicate item guids detected: [{}]", listed.join(", ")),
            );
        }

        errors.into_result()?;
        Ok(Self { items: validated })
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadItem> {
        self.items.iter()
    }

    pub fn batches(&self, size: usize) -> std::slice::Chunks<'_, UploadItem> {
        self.items.chunks(size.max(1))
    }

    pub fn into_items(self) -> Vec<UploadItem> {
        self.items
    }
}

impl<'c> IntoIterator for &'c UploadCollection {
    type Item = &'c UploadItem;
    type IntoIter = std::slice::Iter<'c, UploadItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Guids seen more than once, in order of first appearance.
fn duplicate_keys(items: &[UploadItem]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for key in items.iter().filter_map(UploadItem::key) {
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|key| counts.get(key).copied().unwrap_or(0) > 1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> UploadItem {
        serde_json::from_value(serde_json::json!({
            "date": "2010-01-26T16:14:00",
            "contents": "Example content",
            "guid": "This is my guid",
            "title": "Example Title",
            "author": "me",
            "language": "en",
            "gender": "F",
            "geolocation": {"id": "USA.NY"},
            "pageId": "This is a pageId",
            "parentGuid": "123123",
            "authorProfileId": "1234567",
            "custom": {"field0": "value0", "field1": "45.2"}
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_item_is_normalised() {
        let validated = item().validated().unwrap();
        assert_eq!(validated.date, "2010-01-26T16:14:00+00:00");
        assert_eq!(validated.gender, Some(Gender::F));
    }

    #[test]
    fn test_invalid_fields_are_reported_together() {
        let mut bad = item();
        bad.language = "engl".to_string();
        bad.date = "02-2031-01".to_string();
        bad.url = Some("incorrect.com".to_string());

        let errors = bad.validated().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["language", "date", "url"]);
        assert_eq!(
            errors.for_field("date").unwrap().message,
            "Could not validate format '02-2031-01'. Must be YYYY-MM-DD or iso-formatted time stamp"
        );
    }

    #[test]
    fn test_guid_defaults_to_url() {
        let mut only_url = item();
        only_url.guid = None;
        only_url.url = Some("http://www.brandwatch.com/post1".to_string());

        let validated = only_url.validated().unwrap();
        assert_eq!(validated.guid.as_deref(), Some("http://www.brandwatch.com/post1"));
    }

    #[test]
    fn test_missing_url_and_guid() {
        let mut anonymous = item();
        anonymous.guid = None;
        anonymous.url = None;

        let errors = anonymous.validated().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("guid").unwrap().message,
            "Must specify either valid `guid` or `url`"
        );
    }

    #[test]
    fn test_custom_field_limits() {
        let mut many = item();
        many.custom = Some((0..15).map(|i| (i.to_string(), i.to_string())).collect());
        assert_eq!(
            many.validated().unwrap_err().for_field("custom").unwrap().message,
            "15 custom fields found. Must not exceed 10."
        );

        let mut long = item();
        long.custom = Some(BTreeMap::from([("1".to_string(), "a".repeat(10_002))]));
        assert!(long.validated().unwrap_err().for_field("custom").is_some());
    }

    #[test]
    fn test_geolocation_rules() {
        let by_id = Geolocation {
            id: Some("23452354".to_string()),
            zipcode: Some(String::new()),
            ..Default::default()
        };
        assert!(by_id.validate().is_ok());

        let half = Geolocation {
            latitude: Some(51.5),
            ..Default::default()
        };
        assert!(half.validate().unwrap_err().for_field("longitude").is_some());

        let empty = Geolocation::default();
        assert!(empty.validate().unwrap_err().for_field("zipcode").is_some());
    }

    #[test]
    fn test_timestamp_layouts() {
        assert_eq!(
            normalize_timestamp("2024-05-02").as_deref(),
            Some("2024-05-02T00:00:00+00:00")
        );
        assert_eq!(
            normalize_timestamp("05/02/24 13:45").as_deref(),
            Some("2024-05-02T13:45:00+00:00")
        );
        assert_eq!(
            normalize_timestamp("2024-05-02T13:45:00+02:00").as_deref(),
            Some("2024-05-02T13:45:00+02:00")
        );
        assert_eq!(normalize_timestamp("yesterday"), None);
    }

    #[test]
    fn test_duplicate_guids_are_rejected() {
        let mut first = item();
        first.guid = Some("http://www.brandwatch.com/post1".to_string());
        let second = first.clone();

        let errors = UploadCollection::new(vec![first, second]).unwrap_err();
        assert_eq!(
            errors.for_field("items").unwrap().message,
            "Duplicate item guids detected: ['http://www.brandwatch.com/post1']"
        );
    }

    #[test]
    fn test_item_errors_are_prefixed() {
        let mut bad = item();
        bad.title = String::new();

        let errors = UploadCollection::new(vec![item(), bad]).unwrap_err();
        assert!(errors.for_field("items[1].title").is_some());
    }
}
