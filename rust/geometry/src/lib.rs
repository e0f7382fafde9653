// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GIS2IFC Geometry
//!
//! Turns `geo` feature geometries into model-space shape representations:
//! vertical axes for points, wall-like surfaces for lines and extruded
//! solids for polygons, using nalgebra for points and the rotation.

pub mod elevation;
pub mod error;
pub mod extrusion;
pub mod profile;
pub mod representation;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use elevation::{resolve, ElevationRange, ElevationSpec, ExtrusionBounds};
pub use error::{Error, Result};
pub use extrusion::{extrude_profile, ExtrudedSolid};
pub use profile::Profile2D;
pub use representation::{
    capability, Capability, Face, RepresentationFlags, RepresentationKind, ShapeBuilder,
    ShapeRepresentation,
};
pub use transform::CoordinateTransform;
