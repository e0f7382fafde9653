// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gis2ifc_core::Error),

    #[error(transparent)]
    Geometry(#[from] gis2ifc_geometry::Error),

    #[error("Invalid configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// First failing feature under the abort policy
    #[error(transparent)]
    Feature(Box<FeatureFailure>),

    #[error("{} feature(s) failed to convert", .0.len())]
    FeaturesFailed(Vec<FeatureFailure>),
}

/// A feature that could not be converted; nothing of it is in the output
#[derive(Debug, Error)]
#[error("layer '{layer}', feature {feature_id}: {source}")]
pub struct FeatureFailure {
    pub layer: String,
    pub feature_id: i64,
    #[source]
    pub source: Box<Error>,
}

impl FeatureFailure {
    pub fn new(layer: &str, feature_id: i64, source: Error) -> Self {
        Self {
            layer: layer.to_string(),
            feature_id,
            source: Box::new(source),
        }
    }
}
