// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input dataset not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid dataset {}: {message}", .path.display())]
    InvalidDataset { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write IFC output to {}: {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown entity reference: #{0}")]
    UnknownEntity(u32),

    #[error("Unknown placement")]
    UnknownPlacement,
}

impl Error {
    pub fn invalid_dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::InvalidDataset {
            path: path.into(),
            message: message.into(),
        }
    }
}
