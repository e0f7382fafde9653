// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::representation::RepresentationKind;
use gis2ifc_core::GeometryKind;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building shape representations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported geometry {kind} for {representation} representation: {detail}")]
    UnsupportedGeometry {
        kind: GeometryKind,
        representation: RepresentationKind,
        detail: String,
    },

    #[error("{representation} representation is not implemented for {kind}")]
    NotImplemented {
        representation: RepresentationKind,
        kind: GeometryKind,
    },

    #[error("Invalid elevation attribute '{attribute}': {reason}")]
    InvalidElevationAttribute { attribute: String, reason: String },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

impl Error {
    pub(crate) fn unsupported(
        kind: GeometryKind,
        representation: RepresentationKind,
        detail: impl Into<String>,
    ) -> Self {
        Error::UnsupportedGeometry {
            kind,
            representation,
            detail: detail.into(),
        }
    }

    pub(crate) fn elevation(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidElevationAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}
