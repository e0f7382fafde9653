// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GIS2IFC Processing
//!
//! The conversion pipeline. A [`Converter`] writes the spatial hierarchy
//! once, gives every selected layer its own storey and space, and composes
//! one element per feature with its shapes, property set and quantities.
//!
//! ```rust,no_run
//! use gis2ifc_core::{save, Dataset};
//! use gis2ifc_processing::{convert, ConversionConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::open(Path::new("buildings.geojson"))?;
//! let doc = convert(&dataset, ConversionConfig::default())?;
//! save(&doc, Path::new("buildings.ifc"))?;
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod composer;
pub mod config;
pub mod converter;
pub mod emit;
pub mod error;
pub mod hierarchy;

pub use attributes::{project, quantities, PropertyValue, Quantity};
pub use composer::{ElementComposer, OutputState};
pub use config::{ConversionConfig, ElementClass, ErrorPolicy, ProjectInfo, TransformConfig};
pub use converter::{convert, Conversion, ConversionReport, Converter};
pub use emit::{emit_product_shape, emit_representation};
pub use error::{Error, FeatureFailure, Result};
pub use hierarchy::{LayerContainer, SpatialHierarchy};
