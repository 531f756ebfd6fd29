//
//  bcr-api
//  cli/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Custom content commands
//!
//! `bcr content upload` takes a JSON file holding either an array of items
//! or an object with an `items` array. Every item is validated before the
//! first request is made; a file with any invalid item uploads nothing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Deserialize;

use crate::resources::{ResourceId, ResourceRef};
use crate::upload::{ContentSourceDraft, ContentUploader, UploadCollection, UploadItem};
use crate::ApiError;

use super::{open_project, read_json_file, GlobalOptions};

/// Upload custom content
#[derive(Args, Debug)]
pub struct ContentCommand {
    #[command(subcommand)]
    pub command: ContentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContentSubcommand {
    /// List content sources
    Sources,

    /// Create a content source
    CreateSource(CreateSourceArgs),

    /// Validate and upload items from a JSON file
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
pub struct CreateSourceArgs {
    /// Source name
    pub name: String,

    /// Source description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// JSON file with the items ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Content source name or id
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Ask the API to report usage for the upload
    #[arg(long, requires = "source")]
    pub request_usage: bool,

    /// Validate the file without uploading
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemFile {
    Items(Vec<UploadItem>),
    Wrapped { items: Vec<UploadItem> },
}

impl ItemFile {
    fn into_items(self) -> Vec<UploadItem> {
        match self {
            Self::Items(items) | Self::Wrapped { items } => items,
        }
    }
}

impl ContentCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();

        match &self.command {
            ContentSubcommand::Sources => {
                let project = open_project(&config).await?;
                writer.write_list(&project.content().list_content_sources().await?)
            }
            ContentSubcommand::CreateSource(args) => {
                let mut draft = ContentSourceDraft::new(&args.name);
                if let Some(description) = &args.description {
                    draft = draft.description(description);
                }
                let project = open_project(&config).await?;
                let source = project.content().create_content_source(&draft).await?;
                writer.write_success(&format!(
                    "Created content source {} ({})",
                    source.name, source.id
                ));
                writer.write(&source)
            }
            ContentSubcommand::Upload(args) => {
                let file: ItemFile = read_json_file(&args.file)?;
                let collection = UploadCollection::new(file.into_items())
                    .map_err(ApiError::from)
                    .with_context(|| format!("Invalid items in {}", args.file.display()))?;

                if args.dry_run {
                    writer.write_success(&format!("{} item(s) are valid", collection.len()));
                    return Ok(());
                }

                let project = open_project(&config).await?;
                let uploader = project.content();
                let report = match &args.source {
                    Some(source) => {
                        let id = resolve_source(&uploader, source).await?;
                        uploader
                            .upload_to_source(id, &collection, args.request_usage)
                            .await?
                    }
                    None => uploader.upload(&collection).await?,
                };

                writer.write_success(&format!(
                    "Uploaded {} item(s) in {} batch(es)",
                    report.total_items(),
                    report.batches.len()
                ));
                writer.write(&report)
            }
        }
    }
}

async fn resolve_source(uploader: &ContentUploader<'_>, source: &str) -> Result<ResourceId> {
    if let ResourceRef::Id(id) = ResourceRef::parse(source) {
        return Ok(id);
    }

    let sources = uploader.list_content_sources().await?;
    sources
        .iter()
        .find(|s| s.name == source)
        .or_else(|| sources.iter().find(|s| s.name.eq_ignore_ascii_case(source)))
        .map(|s| s.id)
        .ok_or_else(|| ApiError::not_found("content source", source).into())
}
