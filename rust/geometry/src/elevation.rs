// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion bounds
//!
//! Top and bottom elevations are either literals or the name of a feature
//! attribute. Missing or null attributes fall back to the range scanned over
//! the layer.

use crate::error::{Error, Result};
use gis2ifc_core::{Feature, FeatureValue, Layer};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Literal elevation or attribute name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElevationSpec {
    Literal(f64),
    Attribute(String),
}

impl ElevationSpec {
    pub fn attribute(name: impl Into<String>) -> Self {
        ElevationSpec::Attribute(name.into())
    }
}

/// Numbers become literals, anything else names an attribute
impl FromStr for ElevationSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().parse::<f64>() {
            Ok(value) => ElevationSpec::Literal(value),
            Err(_) => ElevationSpec::Attribute(s.to_string()),
        })
    }
}

impl From<f64> for ElevationSpec {
    fn from(value: f64) -> Self {
        ElevationSpec::Literal(value)
    }
}

impl fmt::Display for ElevationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationSpec::Literal(v) => write!(f, "{}", v),
            ElevationSpec::Attribute(name) => write!(f, "attribute '{}'", name),
        }
    }
}

/// Resolved `(top, bottom)` of one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ExtrusionBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Extrusion distance, `top - bottom`
    #[inline]
    pub fn depth(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Fallback elevations for one layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl ElevationRange {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 10000.0;

    /// Minimum bottom and maximum top found in `layer`. A literal elevation
    /// contributes itself; non-numeric values are ignored here and reported
    /// by [`resolve`].
    pub fn scan(layer: &Layer, bottom: &ElevationSpec, top: &ElevationSpec) -> Self {
        let values = |spec: &ElevationSpec| -> Vec<f64> {
            match spec {
                ElevationSpec::Literal(v) => vec![*v],
                ElevationSpec::Attribute(name) => layer
                    .features
                    .iter()
                    .filter_map(|f| f.attribute(name).and_then(FeatureValue::as_f64))
                    .filter(|v| v.is_finite())
                    .collect(),
            }
        };

        let min = values(bottom).into_iter().reduce(f64::min);
        let max = values(top).into_iter().reduce(f64::max);

        let range = Self {
            min: min.unwrap_or(Self::DEFAULT_MIN),
            max: max.unwrap_or(Self::DEFAULT_MAX),
        };
        tracing::debug!(layer = %layer.name, min = range.min, max = range.max, "Elevation range");
        range
    }

    pub fn resolve(
        &self,
        feature: &Feature,
        bottom: &ElevationSpec,
        top: &ElevationSpec,
    ) -> Result<ExtrusionBounds> {
        resolve(feature, bottom, top, self.min, self.max)
    }
}

/// Resolve the extrusion bounds of `feature`
pub fn resolve(
    feature: &Feature,
    bottom_spec: &ElevationSpec,
    top_spec: &ElevationSpec,
    dataset_min: f64,
    dataset_max: f64,
) -> Result<ExtrusionBounds> {
    let bottom = resolve_one(feature, bottom_spec, dataset_min, "bottom", "min")?;
    let top = resolve_one(feature, top_spec, dataset_max, "top", "max")?;

    if top < bottom {
        return Err(Error::elevation(
            format!("{} / {}", top_spec, bottom_spec),
            format!("top {} is below bottom {} for feature {}", top, bottom, feature.id),
        ));
    }
    Ok(ExtrusionBounds { top, bottom })
}

fn resolve_one(
    feature: &Feature,
    spec: &ElevationSpec,
    fallback: f64,
    which: &str,
    fallback_name: &str,
) -> Result<f64> {
    let name = match spec {
        ElevationSpec::Literal(value) => return Ok(*value),
        ElevationSpec::Attribute(name) => name,
    };

    match feature.attribute(name) {
        None | Some(FeatureValue::Null) => {
            tracing::info!(
                feature_id = feature.id,
                attribute = %name,
                "{} elevation set to {}",
                which,
                fallback_name
            );
            Ok(fallback)
        }
        Some(value @ (FeatureValue::Integer(_) | FeatureValue::Real(_) | FeatureValue::Text(_))) => {
            value.as_f64().ok_or_else(|| {
                Error::elevation(name.as_str(), format!("value '{}' is not numeric", value))
            })
        }
        Some(FeatureValue::Boolean(b)) => Err(Error::elevation(
            name.as_str(),
            format!("boolean value {} is not an elevation", b),
        )),
    }
}
