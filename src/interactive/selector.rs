//
//  bcr-api
//  interactive/selector.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Selection menus.

use anyhow::Result;
use dialoguer::FuzzySelect;

/// Shows a type-to-filter menu and returns the index of the chosen item.
///
/// # Example
///
/// ```no_run
/// use bcr_api::interactive::fuzzy_select;
///
/// let projects = vec!["Brand Health", "Competitors", "Campaigns"];
/// let index = fuzzy_select("Default project", &projects).unwrap();
/// println!("Selected: {}", projects[index]);
/// ```
pub fn fuzzy_select<T: ToString>(message: &str, items: &[T]) -> Result<usize> {
    let selection = FuzzySelect::new()
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact()?;
    Ok(selection)
}

/// Like [`fuzzy_select`], but Esc returns `None` instead of an error.
pub fn fuzzy_select_optional<T: ToString>(message: &str, items: &[T]) -> Result<Option<usize>> {
    let selection = FuzzySelect::new()
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact_opt()?;
    Ok(selection)
}
