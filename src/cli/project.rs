//
//  bcr-api
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! Projects are the scope every other command works in. `bcr project list`
//! shows what the account can see; pick one with `--project` or
//! `bcr config set session.default_project <NAME>`.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::interactive::{fuzzy_select, is_interactive};

use super::{connect, GlobalOptions};

/// List and inspect projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects visible to the account
    #[command(visible_alias = "ls")]
    List,

    /// View project details
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project name or id (defaults to the selected project)
    pub project: Option<String>,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let writer = global.writer();
        let session = connect(&config).await?;

        match &self.command {
            ProjectSubcommand::List => {
                let projects = session.list_projects().await?;
                writer.write_list(&projects)
            }
            ProjectSubcommand::View(args) => {
                let name = args.project.clone().or(config.session.default_project.clone());
                let project = match name {
                    Some(name) => session.resolve_project(&name).await?,
                    None if is_interactive() => {
                        let mut projects = session.list_projects().await?;
                        if projects.is_empty() {
                            anyhow::bail!("No projects are visible to {}", session.username());
                        }
                        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
                        let index = fuzzy_select("Project", &names)?;
                        projects.swap_remove(index)
                    }
                    None => anyhow::bail!("No project given and none selected"),
                };
                writer.write(&project)
            }
        }
    }
}
