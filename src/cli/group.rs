//
//  bcr-api
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query group commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::resources::{GroupSpec, ResourceRef, Sharing};

use super::{confirm, open_project, GlobalOptions};

/// Manage query groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// List query groups
    #[command(visible_alias = "ls")]
    List,

    /// View a group and its queries
    View(ViewArgs),

    /// Create a group from existing queries
    Create(CreateArgs),

    /// Delete a group (its queries are kept)
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Group name or id
    pub group: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Group name
    pub name: String,

    /// Query name or id; repeat for several
    #[arg(long = "query", short = 'q', required = true)]
    pub queries: Vec<String>,

    /// Visibility: public, private or shared
    #[arg(long, default_value = "public")]
    pub shared: Sharing,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Group name or id
    pub group: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();
        let project = open_project(&config).await?;
        let groups = project.groups();

        match &self.command {
            GroupSubcommand::List => writer.write_list(&groups.list().collect_all().await?),
            GroupSubcommand::View(args) => {
                let group = groups.get(ResourceRef::parse(&args.group)).await?;
                writer.write(&group)
            }
            GroupSubcommand::Create(args) => {
                let draft = GroupSpec::new(
                    &args.name,
                    args.queries.iter().map(|q| ResourceRef::parse(q)),
                )
                .shared(args.shared);
                let handle = groups.create(&draft).await?;
                writer.write_success(&format!(
                    "Created group {} with {} queries",
                    handle.name,
                    draft.queries.len()
                ));
                writer.write(&handle)
            }
            GroupSubcommand::Delete(args) => {
                let reference = ResourceRef::parse(&args.group);
                let id = groups.manager().resolve(reference.clone()).await?;
                confirm(&format!("Delete group {}?", reference), args.yes)?;
                groups.delete(id).await?;
                writer.write_success(&format!("Deleted group {}", args.group));
                Ok(())
            }
        }
    }
}
