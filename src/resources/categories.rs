//
//  bcr-api
//  resources/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Categories and their subcategories.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Draft, Resource, ResourceId, ResourceManager};
use crate::api::common::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: ResourceId,
    pub name: String,
}

/// A category as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: ResourceId,

    pub name: String,

    /// Whether a mention may carry more than one subcategory.
    #[serde(default)]
    pub multiple: bool,

    #[serde(default)]
    pub children: Vec<Subcategory>,
}

impl Category {
    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.children.iter().find(|c| c.name == name)
    }
}

impl Resource for Category {
    const KIND: &'static str = "category";
    const PATH: &'static str = "categories";
    type Draft = CategoryDraft;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryDraft {
    pub name: String,
}

/// A category to create: a name and at least one subcategory.
///
/// Categories allow multiple subcategories per mention unless
/// [`single_choice`](Self::single_choice) is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_multiple")]
    pub multiple: bool,

    #[serde(default)]
    pub children: Vec<SubcategoryDraft>,
}

fn default_multiple() -> bool {
    true
}

impl CategoryDraft {
    pub fn new<I, S>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            multiple: true,
            children: children
                .into_iter()
                .map(|name| SubcategoryDraft { name: name.into() })
                .collect(),
        }
    }

    pub fn single_choice(mut self) -> Self {
        self.multiple = false;
        self
    }
}

impl Draft for CategoryDraft {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);

        if self.children.is_empty() {
            errors.push("children", "at least one subcategory is required");
        }

        let mut seen = HashSet::new();
        for child in &self.children {
            if child.name.trim().is_empty() {
                errors.push("children", "subcategory names cannot be blank");
            } else if !seen.insert(child.name.as_str()) {
                errors.push("children", format!("duplicate subcategory '{}'", child.name));
            }
        }

        errors.into_result()
    }
}

pub type Categories<'a> = ResourceManager<'a, Category>;
