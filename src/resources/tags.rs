//
//  bcr-api
//  resources/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{Draft, Resource, ResourceId, ResourceManager};
use crate::api::common::ValidationErrors;

/// A mention tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ResourceId,
    pub name: String,
}

impl Resource for Tag {
    const KIND: &'static str = "tag";
    const PATH: &'static str = "tags";
    type Draft = TagDraft;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDraft {
    #[serde(default)]
    pub name: String,
}

impl TagDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for TagDraft {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

pub type Tags<'a> = ResourceManager<'a, Tag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(TagDraft::new("   ").validate().is_err());
        assert!(TagDraft::new("urgent").validate().is_ok());
    }
}
