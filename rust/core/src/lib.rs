// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GIS2IFC Core
//!
//! Data models on both sides of the conversion:
//!
//! - **Features**: [`Dataset`] / [`Layer`] / [`Feature`] with `geo` geometries
//!   and tagged attribute values, read from GeoJSON by [`Dataset::open`]
//! - **IFC document**: an append-only [`IfcDocument`] of [`Entity`] records
//!   with checkpoint/rollback
//! - **STEP writer**: ISO 10303-21 serialization ([`save`], [`to_step_string`])
//! - **Identifiers**: 22-character GlobalIds behind the [`IdAllocator`] trait
//! - **Placements**: a slotmap arena of parent-relative `IfcLocalPlacement`s
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gis2ifc_core::{Dataset, IfcDocument, IfcType, AttributeValue, save};
//!
//! let dataset = Dataset::open(Path::new("parcels.geojson"))?;
//! let mut doc = IfcDocument::default();
//! let point = doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats([0.0, 0.0, 0.0])]);
//! save(&doc, Path::new("out.ifc"))?;
//! ```

pub mod dataset;
pub mod document;
pub mod error;
pub mod feature;
pub mod georef;
pub mod guid;
pub mod placement;
pub mod schema;
pub mod value;
pub mod writer;

pub use dataset::{layer_from_geojson, read_layer};
pub use document::{Checkpoint, Entity, EntityId, IfcDocument};
pub use error::{Error, Result};
pub use feature::{Dataset, Feature, FeatureValue, GeometryKind, Layer};
pub use georef::GeoReference;
pub use guid::{GlobalId, IdAllocator, SequentialAllocator, UuidAllocator};
pub use placement::{write_axis2_placement, LocalPlacement, PlacementArena, PlacementKey};
pub use schema::IfcType;
pub use value::AttributeValue;
pub use writer::{save, to_step_string, write_step, FileHeader};
