//
//  bcr-api
//  cli/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tag commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::resources::{ResourceRef, TagDraft};

use super::{confirm, open_project, GlobalOptions};

/// Manage tags
#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TagSubcommand {
    /// List tags
    #[command(visible_alias = "ls")]
    List,

    /// Create a tag
    Create {
        /// Tag name
        name: String,
    },

    /// Delete a tag
    Delete {
        /// Tag name or id
        tag: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

impl TagCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();
        let project = open_project(&config).await?;
        let tags = project.tags();

        match &self.command {
            TagSubcommand::List => writer.write_list(&tags.all().await?),
            TagSubcommand::Create { name } => {
                let handle = tags.create(&TagDraft::new(name)).await?;
                writer.write_success(&format!("Created tag {} ({})", handle.name, handle.id));
                Ok(())
            }
            TagSubcommand::Delete { tag, yes } => {
                let reference = ResourceRef::parse(tag);
                let id = tags.resolve(reference.clone()).await?;
                confirm(&format!("Delete tag {}?", reference), *yes)?;
                tags.delete(id).await?;
                writer.write_success(&format!("Deleted tag {}", tag));
                Ok(())
            }
        }
    }
}
