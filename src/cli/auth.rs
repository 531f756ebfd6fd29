//
//  bcr-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `bcr auth login` exchanges a password (or accepts an existing token),
//! stores the access token in the configured token store and remembers the
//! username and default project in the configuration file.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::BcrClient;
use crate::auth::{read_token_from_stdin, validate_token, Credentials};
use crate::config::Config;
use crate::interactive::{
    fuzzy_select_optional, is_interactive, prompt_input, prompt_input_with_default, prompt_password,
};
use crate::output::print_field;
use crate::session::Session;
use crate::util::mask_token;

use super::GlobalOptions;

/// Log in, log out and check credentials.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to Brandwatch
    Login(LoginArgs),

    /// Forget the stored token
    Logout,

    /// View authentication status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read an access token from standard input instead of asking for a password
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the stored token (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;

    let username = match (&global.username, &config.session.username) {
        (Some(username), _) => username.clone(),
        (None, Some(saved)) if is_interactive() => {
            prompt_input_with_default("Brandwatch username:", saved)?
        }
        (None, Some(saved)) => saved.clone(),
        (None, None) if is_interactive() => prompt_input("Brandwatch username:")?,
        (None, None) => anyhow::bail!("No username given. Pass --username or set BCR_USERNAME"),
    };

    let credentials = if args.with_token {
        eprintln!("Paste your access token:");
        let token = read_token_from_stdin()?;
        if !validate_token(&token) {
            anyhow::bail!("Invalid token format");
        }
        Credentials::token_for(&username, token)
    } else {
        if !is_interactive() {
            anyhow::bail!("Cannot prompt for a password here. Use --with-token instead");
        }
        Credentials::password(&username, prompt_password("Password:")?)
    };

    let client = BcrClient::from_config(&config.api)?;
    let session = Session::authenticate(client, credentials).await?;

    let token = session
        .credential()
        .map(|c| c.access_token.expose().to_string())
        .context("Authentication returned no access token")?;
    config
        .token_store()?
        .store(session.username(), &token)
        .context("Failed to store access token")?;

    // Persist without the one-off command-line overrides.
    let mut stored = Config::load()?;
    stored.session.username = Some(session.username().to_string());

    if stored.session.default_project.is_none() && global.project.is_none() && is_interactive() {
        let projects = session.list_projects().await?;
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        if !names.is_empty() {
            if let Some(index) = fuzzy_select_optional("Default project", &names)? {
                stored.session.default_project = Some(names[index].to_string());
            }
        }
    }
    stored.save()?;

    global
        .writer()
        .write_success(&format!("Logged in as {}", session.username()));
    Ok(())
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let Some(username) = config.session.username.clone() else {
        println!("Not logged in");
        return Ok(());
    };

    config.token_store()?.delete(&username)?;

    let mut stored = Config::load()?;
    if stored
        .session
        .username
        .as_deref()
        .is_some_and(|u| u.eq_ignore_ascii_case(&username))
    {
        stored.session.username = None;
        stored.save()?;
    }

    global
        .writer()
        .write_success(&format!("Logged out {}", username));
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;

    let Some(username) = config.session.username.clone() else {
        println!("Not logged in");
        println!();
        println!("Run 'bcr auth login' to authenticate");
        return Ok(());
    };

    let token = config.token_store()?.get(&username)?;
    let session = match &token {
        Some(token) => {
            let client = BcrClient::from_config(&config.api)?;
            match Session::authenticate(client, Credentials::token_for(&username, token.as_str()))
                .await
            {
                Ok(session) => Some(session),
                Err(e) if e.is_rejected_credentials() => {
                    tracing::debug!("Stored token rejected: {}", e);
                    None
                }
                Err(e) => return Err(e).context("Could not check the stored token"),
            }
        }
        None => None,
    };

    if global.json {
        return crate::output::write_json(&serde_json::json!({
            "username": username,
            "token_stored": token.is_some(),
            "valid": session.is_some(),
            "default_project": config.session.default_project,
            "token_store": config.session.token_store.to_string(),
        }));
    }

    let writer = global.writer();
    let color = writer.color_enabled();
    println!("{}", config.api.base_url);
    print_field("  Logged in as", &username, color);
    if let Some(user) = session.as_ref().map(|s| s.user()) {
        let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !full_name.is_empty() {
            print_field("  Name", &full_name, color);
        }
    }
    print_field(
        "  Status",
        match (&token, &session) {
            (None, _) => "No stored token",
            (Some(_), Some(_)) => "Active",
            (Some(_), None) => "Invalid/Expired",
        },
        color,
    );
    print_field("  Token store", &config.session.token_store.to_string(), color);
    if let Some(project) = &config.session.default_project {
        print_field("  Default project", project, color);
    }
    if token.is_some() && session.is_none() {
        writer.write_warning("The stored token was rejected. Run 'bcr auth login' again");
    }
    if args.show_token {
        if let Some(token) = &token {
            print_field("  Token", &mask_token(token), color);
        }
    }

    Ok(())
}
