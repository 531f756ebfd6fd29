//
//  bcr-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bcr_api::cli::{Cli, Commands};
use bcr_api::{exit_codes, ApiError};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BCR_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<bcr_api::cli::Cancelled>().is_some() {
        return exit_codes::CANCELLED;
    }

    let Some(api_error) = error.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
        return exit_codes::ERROR;
    };

    match api_error.root() {
        ApiError::Authentication(_) | ApiError::AuthenticationUnavailable { .. } => {
            exit_codes::AUTH_ERROR
        }
        ApiError::NotFound { .. } => exit_codes::NOT_FOUND,
        ApiError::Validation(_) => exit_codes::VALIDATION,
        ApiError::Transport(_) | ApiError::ServerError(_) => exit_codes::SERVICE_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::Query(cmd) => cmd.run(&cli.global).await,
        Commands::Group(cmd) => cmd.run(&cli.global).await,
        Commands::Tag(cmd) => cmd.run(&cli.global).await,
        Commands::Category(cmd) => cmd.run(&cli.global).await,
        Commands::Content(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("bcr version {}", bcr_api::VERSION);
            Ok(())
        }
    }
}
