//
//  bcr-api
//  resources/queries.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Search queries and the validate, upload and backfill workflow.

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Draft, Listing, Resource, ResourceHandle, ResourceId, ResourceManager, ResourceRef};
use crate::api::common::{ApiError, Result, ValidationErrors, WorkflowStage};
use crate::session::Project;

/// Default query language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default query type.
pub const DEFAULT_QUERY_TYPE: &str = "search string";

/// How far back a new query starts collecting when no start date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

const START_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// A search query as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: ResourceId,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub boolean_query: Option<String>,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub content_sources: Vec<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub last_modification_date: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Resource for Query {
    const KIND: &'static str = "query";
    const PATH: &'static str = "queries";
    type Draft = QueryDraft;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Definition of a query to create or upload.
///
/// `name` and `boolean_query` are required. Every other field has a default;
/// vendor fields not modelled here can be set through [`option`](Self::option).
///
/// A missing `start_date` becomes [`DEFAULT_LOOKBACK_DAYS`] ago when the
/// query is created, and is left out of updates so the stored date stays.
///
/// Drafts read from JSON accept the vendor's field names, and a draft that
/// omits a required field still deserializes so that validation can report
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDraft {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub boolean_query: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_sources: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default = "default_query_type", rename = "type")]
    pub kind: String,

    #[serde(flatten)]
    pub options: Map<String, Value>,
}

fn default_languages() -> Vec<String> {
    vec![DEFAULT_LANGUAGE.to_string()]
}

fn default_query_type() -> String {
    DEFAULT_QUERY_TYPE.to_string()
}

fn default_start_date() -> String {
    (Local::now() - Duration::days(DEFAULT_LOOKBACK_DAYS))
        .format(START_DATE_FORMAT)
        .to_string()
}

impl QueryDraft {
    pub fn new(name: impl Into<String>, boolean_query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boolean_query: boolean_query.into(),
            description: String::new(),
            languages: default_languages(),
            content_sources: Vec::new(),
            start_date: None,
            kind: default_query_type(),
            options: Map::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn content_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(format!("{}T00:00:00.000+0000", date.format("%Y-%m-%d")));
        self
    }

    /// Sets any other vendor field verbatim.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The draft as sent on create, with the start date filled in.
    fn for_create(&self) -> Self {
        let mut draft = self.clone();
        draft.start_date.get_or_insert_with(default_start_date);
        draft
    }

    /// Language sent to the validation endpoint.
    fn primary_language(&self) -> &str {
        self.languages
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

impl Draft for QueryDraft {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("booleanQuery", &self.boolean_query);

        if self.languages.is_empty() {
            errors.push("languages", "at least one language is required");
        }
        for language in &self.languages {
            if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
                errors.push(
                    "languages",
                    format!("'{}' is not a two-letter language code", language),
                );
            }
        }

        errors.into_result()
    }
}

/// Inclusive date range for a backfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// From `start` up to now.
    pub fn since(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let today = Utc::now().date_naive();

        if self.start > today {
            errors.push("minDate", format!("{} is in the future", self.start));
        }
        if let Some(end) = self.end {
            if end < self.start {
                errors.push("maxDate", format!("{} is before {}", end, self.start));
            }
        }

        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackfillRequest {
    min_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_date: Option<String>,
}

impl From<&DateRange> for BackfillRequest {
    fn from(range: &DateRange) -> Self {
        Self {
            min_date: range.start.format("%Y-%m-%d").to_string(),
            max_date: range.end.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationRequest<'q> {
    query: &'q str,
    language: &'q str,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    errors: Vec<Value>,
}

fn describe_vendor_error(value: &Value) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| value.as_str().map(str::to_string))
        .unwrap_or_else(|| value.to_string())
}

/// Manager for search queries.
///
/// Adds remote validation, upload (create-or-update by name), backfill and
/// the composite [`upload_and_backfill`](Self::upload_and_backfill) on top
/// of the generic operations.
pub struct Queries<'a> {
    inner: ResourceManager<'a, Query>,
}

impl<'a> Queries<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            inner: ResourceManager::new(project),
        }
    }

    /// The generic manager underneath.
    pub fn manager(&self) -> &ResourceManager<'a, Query> {
        &self.inner
    }

    pub fn list(&self) -> Listing<'_, Query> {
        self.inner.list()
    }

    pub async fn get(&self, reference: impl Into<ResourceRef>) -> Result<Query> {
        self.inner.get(reference).await
    }

    pub async fn resolve(&self, reference: impl Into<ResourceRef>) -> Result<ResourceId> {
        self.inner.resolve(reference).await
    }

    pub async fn create(&self, draft: &QueryDraft) -> Result<ResourceHandle> {
        self.inner.create(&draft.for_create()).await
    }

    pub async fn delete(&self, reference: impl Into<ResourceRef>) -> Result<()> {
        self.inner.delete(reference).await
    }

    /// Checks a draft locally, then asks the API whether its boolean query
    /// parses.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] with a `booleanQuery` entry for every problem
    /// the API reports.
    pub async fn validate(&self, draft: &QueryDraft) -> Result<()> {
        draft.validate()?;

        let request = ValidationRequest {
            query: &draft.boolean_query,
            language: draft.primary_language(),
        };

        let response: Option<ValidationResponse> = match self
            .inner
            .project()
            .client()
            .get_with_query("query-validation", &request)
            .await
        {
            Ok(response) => response,
            Err(ApiError::BadRequest(message)) => {
                return Err(ValidationErrors::single("booleanQuery", message).into());
            }
            Err(err) => return Err(err),
        };

        let mut errors = ValidationErrors::new();
        for error in response.unwrap_or_default().errors {
            errors.push("booleanQuery", describe_vendor_error(&error));
        }
        errors.into_result()?;

        tracing::debug!("Query '{}' passed validation", draft.name);
        Ok(())
    }

    /// Creates the query, or updates the existing query with the same name.
    ///
    /// An update without a start date keeps the stored one.
    pub async fn upload(&self, draft: &QueryDraft) -> Result<ResourceHandle> {
        draft.validate()?;

        match self.inner.resolve(draft.name.as_str()).await {
            Ok(id) => self.inner.update(id, draft).await,
            Err(ApiError::NotFound { .. }) => self.create(draft).await,
            Err(err) => Err(err),
        }
    }

    /// Asks the API to collect historical mentions for a query.
    pub async fn backfill(&self, reference: impl Into<ResourceRef>, range: &DateRange) -> Result<()> {
        range.validate()?;

        let reference = reference.into();
        let request = BackfillRequest::from(range);
        let request = &request;

        let _: Value = self
            .inner
            .with_resolved(&reference, |id| async move {
                let path = format!("{}/backfill", self.inner.item_path(id));
                self.inner.project().client().post::<Value, _>(&path, request).await
            })
            .await?;

        tracing::info!("Backfill requested for query {} from {}", reference, range.start);
        Ok(())
    }

    /// Validates, uploads and backfills a query, in that order.
    ///
    /// Stops at the first failure. The returned error is
    /// [`ApiError::Workflow`] naming the stage that failed; a draft that
    /// fails validation is never uploaded.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bcr_api::resources::{DateRange, QueryDraft};
    /// use chrono::NaiveDate;
    ///
    /// # async fn run(project: &bcr_api::session::Project) -> bcr_api::Result<()> {
    /// let draft = QueryDraft::new("Brand mentions", "acme OR \"acme corp\"")
    ///     .languages(["en", "fr"]);
    /// let since = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    ///
    /// let handle = project
    ///     .queries()
    ///     .upload_and_backfill(&draft, &DateRange::since(since))
    ///     .await?;
    /// println!("uploaded query {}", handle.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_and_backfill(
        &self,
        draft: &QueryDraft,
        range: &DateRange,
    ) -> Result<ResourceHandle> {
        tracing::info!("Validating query '{}'", draft.name);
        range
            .validate()
            .map_err(|e| ApiError::from(e).at_stage(WorkflowStage::Validate))?;
        self.validate(draft)
            .await
            .map_err(|e| e.at_stage(WorkflowStage::Validate))?;

        tracing::info!("Uploading query '{}'", draft.name);
        let handle = self
            .upload(draft)
            .await
            .map_err(|e| e.at_stage(WorkflowStage::Upload))?;

        tracing::info!("Backfilling query '{}'", draft.name);
        self.backfill(&handle, range)
            .await
            .map_err(|e| e.at_stage(WorkflowStage::Backfill))?;

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = QueryDraft::new("Brand", "acme");
        assert_eq!(draft.languages, vec!["en"]);
        assert_eq!(draft.kind, "search string");
        assert!(draft.validate().is_ok());

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["booleanQuery"], "acme");
        assert_eq!(json["type"], "search string");
        assert!(json.get("contentSources").is_none());
        assert!(json.get("startDate").is_none());
    }

    #[test]
    fn test_start_date_defaults_on_create_only() {
        let draft = QueryDraft::new("Brand", "acme");
        let created = draft.for_create();
        let start = created.start_date.as_deref().unwrap();
        let expected = (Local::now() - Duration::days(DEFAULT_LOOKBACK_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        assert!(start.starts_with(&expected), "unexpected start date {start}");

        let explicit = QueryDraft::new("Brand", "acme")
            .start_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .for_create();
        assert_eq!(
            explicit.start_date.as_deref(),
            Some("2024-06-01T00:00:00.000+0000")
        );
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let draft: QueryDraft = serde_json::from_str(r#"{"description": "no name"}"#).unwrap();
        let errors = draft.validate().unwrap_err();
        assert!(errors.for_field("name").is_some());
        assert!(errors.for_field("booleanQuery").is_some());
    }

    #[test]
    fn test_bad_language_code() {
        let draft = QueryDraft::new("Brand", "acme").languages(["english"]);
        let errors = draft.validate().unwrap_err();
        assert!(errors.for_field("languages").is_some());
    }

    #[test]
    fn test_options_are_flattened() {
        let draft = QueryDraft::new("Brand", "acme").option("imageAnalysisType", "all");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["imageAnalysisType"], "all");
    }

    #[test]
    fn test_date_range_validation() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(DateRange::since(start).validate().is_ok());
        assert!(DateRange::between(start, end).validate().is_err());

        let future = Utc::now().date_naive() + Duration::days(30);
        assert!(DateRange::since(future).validate().is_err());
    }

    #[test]
    fn test_backfill_body() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let body = serde_json::to_value(BackfillRequest::from(&DateRange::since(start))).unwrap();
        assert_eq!(body, serde_json::json!({"minDate": "2025-03-01"}));
    }
}
