//
//  bcr-api
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Interactive Prompts
//!
//! Terminal prompts used by `bcr auth login` and confirmation of
//! destructive commands, built on `dialoguer`.
//!
//! Every function blocks until the user answers and fails when stdin is not
//! a terminal, so callers check [`is_interactive`](super::is_interactive)
//! before prompting from scripts.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for a line of text.
///
/// # Example
///
/// ```no_run
/// use bcr_api::interactive::prompt_input;
///
/// let username = prompt_input("Brandwatch username:").unwrap();
/// ```
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompts for a secret; the input is not echoed.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
