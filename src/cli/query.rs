//
//  bcr-api
//  cli/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query commands
//!
//! Queries are addressed by name everywhere; a purely numeric argument is
//! taken as an id. A draft comes either from flags or from a JSON file with
//! the same fields the API accepts (`name`, `booleanQuery`, `languages`,
//! ...), and `-` reads that file from stdin.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::resources::{DateRange, QueryDraft, ResourceRef};
use crate::util::parse_date_arg;

use super::{confirm, open_project, read_json_file, GlobalOptions};

/// Manage search queries
#[derive(Args, Debug)]
pub struct QueryCommand {
    #[command(subcommand)]
    pub command: QuerySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuerySubcommand {
    /// List queries in the project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a query
    View(ViewArgs),

    /// Create a query
    Create(DraftArgs),

    /// Check a query without saving it
    Validate(DraftArgs),

    /// Create or update a query by name, optionally backfilling it
    Upload(UploadArgs),

    /// Collect historical mentions for a query
    Backfill(BackfillArgs),

    /// Delete a query
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of queries to show
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Query name or id
    pub query: String,
}

#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Query name
    pub name: Option<String>,

    /// Boolean search string
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Language code; repeat for several
    #[arg(long = "language", short = 'L')]
    pub languages: Vec<String>,

    /// Query description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Content source; repeat for several
    #[arg(long = "content-source")]
    pub content_sources: Vec<String>,

    /// Earliest date the query collects from (YYYY-MM-DD, 7d, 2w)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Read the query from a JSON file ("-" for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["name", "query"])]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    /// Backfill from this date after uploading
    #[arg(long)]
    pub since: Option<String>,

    /// Backfill up to this date
    #[arg(long, requires = "since")]
    pub until: Option<String>,
}

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Query name or id
    pub query: String,

    /// First date to collect (YYYY-MM-DD, today, yesterday, 7d, 2w)
    #[arg(long)]
    pub since: String,

    /// Last date to collect
    #[arg(long)]
    pub until: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Query name or id
    pub query: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl DraftArgs {
    fn draft(&self) -> Result<QueryDraft> {
        if let Some(path) = &self.file {
            return read_json_file(path);
        }

        let mut draft = QueryDraft::new(
            self.name.clone().unwrap_or_default(),
            self.query.clone().unwrap_or_default(),
        );
        if !self.languages.is_empty() {
            draft = draft.languages(&self.languages);
        }
        if let Some(description) = &self.description {
            draft = draft.description(description);
        }
        if !self.content_sources.is_empty() {
            draft = draft.content_sources(&self.content_sources);
        }
        if let Some(start) = &self.start_date {
            draft = draft.start_date(parse_date_arg(start)?);
        }
        Ok(draft)
    }
}

fn date_range(since: &str, until: Option<&str>) -> Result<DateRange> {
    let start = parse_date_arg(since)?;
    Ok(match until {
        Some(until) => DateRange::between(start, parse_date_arg(until)?),
        None => DateRange::since(start),
    })
}

impl QueryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();

        match &self.command {
            QuerySubcommand::List(args) => {
                let project = open_project(&config).await?;
                let mut all = project.queries().list().collect_all().await?;
                if let Some(limit) = args.limit {
                    all.truncate(limit);
                }
                writer.write_list(&all)
            }
            QuerySubcommand::View(args) => {
                let project = open_project(&config).await?;
                let query = project
                    .queries()
                    .get(ResourceRef::parse(&args.query))
                    .await?;
                writer.write(&query)
            }
            QuerySubcommand::Create(args) => {
                let draft = args.draft()?;
                let project = open_project(&config).await?;
                let handle = project.queries().create(&draft).await?;
                writer.write_success(&format!("Created query {} ({})", handle.name, handle.id));
                writer.write(&handle)
            }
            QuerySubcommand::Validate(args) => {
                let draft = args.draft()?;
                let project = open_project(&config).await?;
                project.queries().validate(&draft).await?;
                writer.write_success(&format!("Query '{}' is valid", draft.name));
                Ok(())
            }
            QuerySubcommand::Upload(args) => {
                let draft = args.draft.draft()?;
                let range = args
                    .since
                    .as_deref()
                    .map(|since| date_range(since, args.until.as_deref()))
                    .transpose()?;

                let project = open_project(&config).await?;
                let queries = project.queries();
                let handle = match range {
                    Some(range) => {
                        let handle = queries.upload_and_backfill(&draft, &range).await?;
                        writer.write_success(&format!(
                            "Uploaded query {} and requested backfill from {}",
                            handle.name, range.start
                        ));
                        handle
                    }
                    None => {
                        let handle = queries.upload(&draft).await?;
                        writer.write_success(&format!("Uploaded query {}", handle.name));
                        handle
                    }
                };
                writer.write(&handle)
            }
            QuerySubcommand::Backfill(args) => {
                let range = date_range(&args.since, args.until.as_deref())?;
                let project = open_project(&config).await?;
                project
                    .queries()
                    .backfill(ResourceRef::parse(&args.query), &range)
                    .await?;
                writer.write_success(&format!(
                    "Requested backfill for {} from {}",
                    args.query, range.start
                ));
                Ok(())
            }
            QuerySubcommand::Delete(args) => {
                let project = open_project(&config).await?;
                let queries = project.queries();
                let reference = ResourceRef::parse(&args.query);
                // Fail on unknown names before asking.
                let id = queries.resolve(reference.clone()).await?;
                confirm(&format!("Delete query {}?", reference), args.yes)?;
                queries.delete(id).await?;
                writer.write_success(&format!("Deleted query {}", args.query));
                Ok(())
            }
        }
    }
}
