//
//  bcr-api
//  upload/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Custom Content Upload
//!
//! Documents from outside the Brandwatch data library (survey responses,
//! support tickets, proprietary content) can be uploaded for analysis.
//!
//! Items are validated locally with [`UploadCollection::new`] before they
//! are sent:
//!
//! - `title`, `author`, `language` (2 letters), `date` and `contents` are required
//! - every item needs a `guid` or an http(s) `url`; the url doubles as the guid
//! - dates are normalised to RFC 3339
//! - at most 10 custom fields, with bounded key and value lengths
//! - guids must be unique within a collection
//!
//! [`ContentUploader`] then sends the collection, in batches of
//! [`MAX_BATCH_SIZE`] when it is large.

mod content;
mod validation;

pub use content::*;
pub use validation::*;
