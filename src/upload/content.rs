//
//  bcr-api
//  upload/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Custom content sources and uploads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{UploadCollection, UploadItem};
use crate::api::common::{Page, Result, ValidationErrors};
use crate::resources::ResourceId;
use crate::session::Project;

/// Largest number of items sent in one request.
pub const MAX_BATCH_SIZE: usize = 1000;

const CONTENT_SOURCES_PATH: &str = "content/sources";

/// A custom content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSource {
    pub id: ResourceId,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSourceDraft {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentSourceDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceList {
    Bare(Vec<ContentSource>),
    Paged(Page<ContentSource>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'i> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content_source: Option<ResourceId>,

    items: &'i [UploadItem],

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    request_usage: bool,
}

/// The API's answer to one upload request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    /// 0-based batch number.
    pub batch: usize,

    /// Items sent in this batch.
    pub items: usize,

    pub response: Value,
}

impl BatchResponse {
    /// `Batch N`
    pub fn label(&self) -> String {
        format!("Batch {}", self.batch)
    }
}

/// Responses for every request an upload made.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadReport {
    pub batches: Vec<BatchResponse>,
}

impl UploadReport {
    pub fn total_items(&self) -> usize {
        self.batches.iter().map(|b| b.items).sum()
    }

    pub fn is_batched(&self) -> bool {
        self.batches.len() > 1
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.batches
            .iter()
            .find(|b| b.label() == label)
            .map(|b| &b.response)
    }
}

/// Uploads custom content for analysis.
///
/// Collections larger than [`MAX_BATCH_SIZE`] are split and sent one batch
/// at a time; the report holds one response per batch.
///
/// # Example
///
/// ```rust,no_run
/// use bcr_api::upload::{UploadCollection, UploadItem};
///
/// # async fn run(project: &bcr_api::session::Project, items: Vec<UploadItem>) -> anyhow::Result<()> {
/// let collection = UploadCollection::new(items)?;
/// let report = project.content().upload(&collection).await?;
/// println!("sent {} item(s) in {} batch(es)", report.total_items(), report.batches.len());
/// # Ok(())
/// # }
/// ```
pub struct ContentUploader<'a> {
    project: &'a Project,
}

impl<'a> ContentUploader<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub async fn list_content_sources(&self) -> Result<Vec<ContentSource>> {
        let list: SourceList = self.project.client().get(CONTENT_SOURCES_PATH).await?;
        Ok(match list {
            SourceList::Bare(sources) => sources,
            SourceList::Paged(page) => page.results,
        })
    }

    pub async fn create_content_source(&self, draft: &ContentSourceDraft) -> Result<ContentSource> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &draft.name);
        errors.into_result()?;

        let source: ContentSource = self.project.client().post(CONTENT_SOURCES_PATH, draft).await?;
        tracing::info!("Created content source '{}' ({})", source.name, source.id);
        Ok(source)
    }

    /// Uploads a collection without naming a content source.
    pub async fn upload(&self, collection: &UploadCollection) -> Result<UploadReport> {
        self.send(None, collection, false).await
    }

    /// Uploads a collection into a content source.
    pub async fn upload_to_source(
        &self,
        source: ResourceId,
        collection: &UploadCollection,
        request_usage: bool,
    ) -> Result<UploadReport> {
        self.send(Some(source), collection, request_usage).await
    }

    async fn send(
        &self,
        source: Option<ResourceId>,
        collection: &UploadCollection,
        request_usage: bool,
    ) -> Result<UploadReport> {
        if collection.is_empty() {
            return Err(ValidationErrors::single("items", "nothing to upload").into());
        }

        if collection.len() > MAX_BATCH_SIZE {
            tracing::info!(
                "More than {} items found. Uploading in batches of {}.",
                MAX_BATCH_SIZE,
                MAX_BATCH_SIZE
            );
        }

        let mut report = UploadReport::default();
        for (batch, items) in collection.batches(MAX_BATCH_SIZE).enumerate() {
            let request = UploadRequest {
                content_source: source,
                items,
                request_usage,
            };

            let response: Value = self.project.client().post(CONTENT_SOURCES_PATH, &request).await?;
            if collection.len() > MAX_BATCH_SIZE {
                tracing::info!("Uploaded batch number: {}", batch);
            }

            report.batches.push(BatchResponse {
                batch,
                items: items.len(),
                response,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_list_shapes() {
        let bare: SourceList = serde_json::from_str(r#"[{"id": 1, "name": "Surveys"}]"#).unwrap();
        assert!(matches!(bare, SourceList::Bare(ref s) if s.len() == 1));

        let paged: SourceList =
            serde_json::from_str(r#"{"results": [{"id": 1, "name": "Surveys"}]}"#).unwrap();
        assert!(matches!(paged, SourceList::Paged(ref p) if p.results.len() == 1));
    }

    #[test]
    fn test_upload_request_body() {
        let items: Vec<UploadItem> = Vec::new();
        let request = UploadRequest {
            content_source: Some(ResourceId(42)),
            items: &items,
            request_usage: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"contentSource": 42, "items": []})
        );
    }

    #[test]
    fn test_report_labels() {
        let report = UploadReport {
            batches: vec![
                BatchResponse { batch: 0, items: 1000, response: serde_json::json!({}) },
                BatchResponse { batch: 1, items: 50, response: serde_json::json!({"ok": true}) },
            ],
        };
        assert!(report.is_batched());
        assert_eq!(report.total_items(), 1050);
        assert_eq!(report.get("Batch 1"), Some(&serde_json::json!({"ok": true})));
    }
}
