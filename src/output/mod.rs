//
//  bcr-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering of command results for the `bcr` binary:
//!
//! - **Table format**: human-readable output for interactive terminal use
//! - **JSON format**: machine-readable output for scripting (`--json`)
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available formats
//! - [`OutputWriter`]: entry point for writing results and status messages
//! - [`TableOutput`]: implemented by every resource the CLI prints
//!
//! ## Example
//!
//! ```rust,ignore
//! use bcr_api::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&queries)?;
//! writer.write_success("Query uploaded");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

use crate::resources::{Category, Group, Query, ResourceHandle, Tag};
use crate::session::ProjectRef;
use crate::upload::{ContentSource, UploadReport};

/// How command results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and key/value listings with optional color.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes results in the selected format.
///
/// Color is detected from the terminal and disabled when output is piped.
/// Status messages go to stdout, errors and warnings to stderr.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list as a JSON array or one table.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values),
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("No results");
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(TableRow::row))
                    .print();
                Ok(())
            }
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("!").yellow().bold(), msg);
        } else {
            eprintln!("! {}", msg);
        }
    }

    /// Success line in table mode; suppressed in JSON mode so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        if self.is_json() {
            return;
        }
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Detailed, multi-line rendering of one value.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// One row of a listing table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints `key: value`, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

impl TableRow for ProjectRef {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Timezone", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.timezone.as_deref()),
            truncate(&or_dash(self.description.as_deref()), 50),
        ]
    }
}

impl TableOutput for ProjectRef {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Timezone", &or_dash(self.timezone.as_deref()), color);
        print_field("Description", &or_dash(self.description.as_deref()), color);
    }
}

impl TableRow for Query {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Languages", "Boolean query"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.languages.join(","),
            truncate(&or_dash(self.boolean_query.as_deref()), 60),
        ]
    }
}

impl TableOutput for Query {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Type", &or_dash(self.kind.as_deref()), color);
        print_field("Description", &or_dash(self.description.as_deref()), color);
        print_field("Languages", &self.languages.join(", "), color);
        print_field("Start date", &or_dash(self.start_date.as_deref()), color);
        print_field(
            "Last modified",
            &or_dash(self.last_modification_date.as_deref()),
            color,
        );
        println!();
        println!("{}", self.boolean_query.as_deref().unwrap_or_default());
    }
}

impl TableRow for Group {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Queries", "Shared"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.queries.len().to_string(),
            or_dash(self.shared.as_deref()),
        ]
    }
}

impl TableOutput for Group {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Shared", &or_dash(self.shared.as_deref()), color);
        println!();
        TableBuilder::new()
            .color(color)
            .headers(["Query ID", "Query"])
            .rows(
                self.queries
                    .iter()
                    .map(|q| vec![q.id.to_string(), or_dash(q.name.as_deref())]),
            )
            .print();
    }
}

impl TableRow for Tag {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl TableRow for Category {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Multiple", "Subcategories"]
    }

    fn row(&self) -> Vec<String> {
        let children: Vec<&str> = self.children.iter().map(|c| c.name.as_str()).collect();
        vec![
            self.id.to_string(),
            self.name.clone(),
            format_bool(self.multiple, false),
            truncate(&children.join(", "), 50),
        ]
    }
}

impl TableOutput for Category {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Multiple", &format_bool(self.multiple, color), color);
        println!();
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Subcategory"])
            .rows(
                self.children
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone()]),
            )
            .print();
    }
}

impl TableRow for ContentSource {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            truncate(&or_dash(self.description.as_deref()), 50),
        ]
    }
}

impl TableOutput for ContentSource {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Description", &or_dash(self.description.as_deref()), color);
    }
}

impl TableOutput for ResourceHandle {
    fn print_table(&self, color: bool) {
        print_field("Kind", self.kind, color);
        print_field("ID", &self.id.to_string(), color);
        print_field("Name", &self.name, color);
    }
}

impl TableOutput for UploadReport {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["Batch", "Items", "Response"])
            .rows(self.batches.iter().map(|b| {
                vec![
                    b.label(),
                    b.items.to_string(),
                    truncate(&b.response.to_string(), 60),
                ]
            }))
            .print();
    }
}
