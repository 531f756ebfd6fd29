//
//  bcr-api
//  cli/category.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Category commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::resources::{CategoryDraft, ResourceRef};

use super::{confirm, open_project, GlobalOptions};

/// Manage categories
#[derive(Args, Debug)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategorySubcommand {
    /// List categories
    #[command(visible_alias = "ls")]
    List,

    /// View a category and its subcategories
    View(ViewArgs),

    /// Create a category
    Create(CreateArgs),

    /// Delete a category
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Category name or id
    pub category: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Category name
    pub name: String,

    /// Subcategory name; repeat for several
    #[arg(long = "child", short = 'c', required = true)]
    pub children: Vec<String>,

    /// Allow only one subcategory per mention
    #[arg(long)]
    pub single: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Category name or id
    pub category: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl CategoryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();
        let project = open_project(&config).await?;
        let categories = project.categories();

        match &self.command {
            CategorySubcommand::List => writer.write_list(&categories.all().await?),
            CategorySubcommand::View(args) => {
                let category = categories.get(ResourceRef::parse(&args.category)).await?;
                writer.write(&category)
            }
            CategorySubcommand::Create(args) => {
                let mut draft = CategoryDraft::new(&args.name, &args.children);
                if args.single {
                    draft = draft.single_choice();
                }
                let handle = categories.create(&draft).await?;
                writer.write_success(&format!(
                    "Created category {} with {} subcategories",
                    handle.name,
                    draft.children.len()
                ));
                Ok(())
            }
            CategorySubcommand::Delete(args) => {
                let reference = ResourceRef::parse(&args.category);
                let id = categories.resolve(reference.clone()).await?;
                confirm(&format!("Delete category {}?", reference), args.yes)?;
                categories.delete(id).await?;
                writer.write_success(&format!("Deleted category {}", args.category));
                Ok(())
            }
        }
    }
}
