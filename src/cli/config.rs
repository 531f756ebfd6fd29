//
//  bcr-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for managing the CLI configuration,
//! including getting, setting, and listing configuration values. These
//! commands read and write the file directly; `--project`, `--username`
//! and `--api-url` do not apply to them.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key (e.g. session.default_project)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g. session.default_project)
    pub key: String,

    /// Value to set
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::Unset(args) => unset(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "Unknown config key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}

fn get(args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;
    let value = Config::load()?.get(&args.key);

    if global.json {
        return crate::output::write_json(&serde_json::json!({ &args.key: value }));
    }
    match value {
        Some(value) => println!("{}", value),
        None => println!("(not set)"),
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;

    global
        .writer()
        .write_success(&format!("Set {} to {}", args.key, args.value));
    Ok(())
}

fn unset(args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.unset(&args.key)?;
    config.save()?;

    global.writer().write_success(&format!("Unset {}", args.key));
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        return crate::output::write_json(&config);
    }

    let color = console::colors_enabled();
    for key in CONFIG_KEYS {
        let value = config.get(key);
        match (value, color) {
            (Some(value), true) => println!("{} = {}", style(key).cyan(), value),
            (Some(value), false) => println!("{} = {}", key, value),
            (None, true) => println!("{} = {}", style(key).cyan(), style("(not set)").dim()),
            (None, false) => println!("{} = (not set)", key),
        }
    }
    Ok(())
}
