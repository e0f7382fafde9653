// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape representation builder
//!
//! Dispatches on (representation kind, geometry kind). The builder is pure:
//! it returns model-space descriptions, and emitting entities for them is
//! left to the caller.

use crate::elevation::ExtrusionBounds;
use crate::error::{Error, Result};
use crate::extrusion::{extrude_profile, ExtrudedSolid};
use crate::profile::Profile2D;
use crate::transform::CoordinateTransform;
use geo::{Geometry, LineString, Point, Polygon};
use gis2ifc_core::GeometryKind;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Representation kinds, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationKind {
    #[serde(alias = "cog")]
    CenterOfGravity,
    #[serde(alias = "box")]
    BoundingBox,
    Axis,
    #[serde(alias = "footprint")]
    FootPrint,
    Surface,
    Body,
}

impl RepresentationKind {
    pub const ALL: [RepresentationKind; 6] = [
        RepresentationKind::CenterOfGravity,
        RepresentationKind::BoundingBox,
        RepresentationKind::Axis,
        RepresentationKind::FootPrint,
        RepresentationKind::Surface,
        RepresentationKind::Body,
    ];

    /// `RepresentationIdentifier` of `IfcShapeRepresentation`
    pub fn identifier(&self) -> &'static str {
        match self {
            RepresentationKind::CenterOfGravity => "CoG",
            RepresentationKind::BoundingBox => "Box",
            RepresentationKind::Axis => "Axis",
            RepresentationKind::FootPrint => "FootPrint",
            RepresentationKind::Surface => "Surface",
            RepresentationKind::Body => "Body",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for RepresentationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "cog" | "centerofgravity" => Ok(RepresentationKind::CenterOfGravity),
            "box" | "boundingbox" => Ok(RepresentationKind::BoundingBox),
            "axis" => Ok(RepresentationKind::Axis),
            "footprint" => Ok(RepresentationKind::FootPrint),
            "surface" => Ok(RepresentationKind::Surface),
            "body" => Ok(RepresentationKind::Body),
            _ => Err(format!(
                "unknown representation '{}', expected one of: cog, box, axis, footprint, surface, body",
                s
            )),
        }
    }
}

/// Set of enabled representation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentationFlags(u8);

impl Default for RepresentationFlags {
    /// Surface and Body
    fn default() -> Self {
        [RepresentationKind::Surface, RepresentationKind::Body]
            .into_iter()
            .collect()
    }
}

impl RepresentationFlags {
    pub fn empty() -> Self {
        RepresentationFlags(0)
    }

    pub fn contains(&self, kind: RepresentationKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: RepresentationKind) {
        self.0 |= kind.bit();
    }

    /// Enabled kinds in processing order
    pub fn iter(&self) -> impl Iterator<Item = RepresentationKind> + '_ {
        RepresentationKind::ALL
            .into_iter()
            .filter(move |k| self.contains(*k))
    }
}

impl FromIterator<RepresentationKind> for RepresentationFlags {
    fn from_iter<I: IntoIterator<Item = RepresentationKind>>(iter: I) -> Self {
        let mut flags = RepresentationFlags::empty();
        for kind in iter {
            flags.insert(kind);
        }
        flags
    }
}

/// Whether a builder exists for a pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    /// The representation does not apply to this geometry; skipped
    Inapplicable,
    /// Declared but not built; requesting it is an error
    Unimplemented,
}

/// Capability table over the six supported geometry kinds. Other kinds have
/// no builder at all and are rejected before this lookup.
pub fn capability(kind: RepresentationKind, geometry: GeometryKind) -> Capability {
    use Capability::*;
    use GeometryKind as G;
    use RepresentationKind as R;

    match (kind, geometry) {
        (R::CenterOfGravity | R::BoundingBox | R::FootPrint, _) => Unimplemented,
        (R::Axis, G::Point | G::MultiPoint) => Supported,
        (R::Axis, _) => Unimplemented,
        (R::Surface, G::LineString) => Supported,
        (R::Surface, G::MultiLineString) => Unimplemented,
        (R::Surface, _) => Inapplicable,
        (R::Body, G::Polygon | G::MultiPolygon) => Supported,
        (R::Body, _) => Inapplicable,
    }
}

/// Closed quadrilateral panel: `p0@bottom, p1@bottom, p1@top, p0@top`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub corners: [Point3<f64>; 4],
}

/// Built representation, in model coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRepresentation {
    /// One vertical 3D polyline
    Axis(Vec<Point3<f64>>),
    Surface(Vec<Face>),
    Body(Vec<ExtrudedSolid>),
}

impl ShapeRepresentation {
    pub fn kind(&self) -> RepresentationKind {
        match self {
            ShapeRepresentation::Axis(_) => RepresentationKind::Axis,
            ShapeRepresentation::Surface(_) => RepresentationKind::Surface,
            ShapeRepresentation::Body(_) => RepresentationKind::Body,
        }
    }

    /// `RepresentationType` of `IfcShapeRepresentation`
    pub fn representation_type(&self) -> &'static str {
        match self {
            ShapeRepresentation::Axis(_) => "Curve3D",
            ShapeRepresentation::Surface(_) => "SurfaceModel",
            ShapeRepresentation::Body(_) => "SweptSolid",
        }
    }
}

/// Builds the enabled representations of a feature geometry
#[derive(Debug, Clone)]
pub struct ShapeBuilder<'a> {
    transform: &'a CoordinateTransform,
    flags: RepresentationFlags,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(transform: &'a CoordinateTransform, flags: RepresentationFlags) -> Self {
        Self { transform, flags }
    }

    /// All enabled representations, in processing order. Inapplicable
    /// pairings are skipped; the first failure aborts the build.
    ///
    /// `bounds` is only evaluated when at least one enabled kind applies to
    /// the geometry, so an unusable elevation does not fail a feature that
    /// gets no representation from it.
    pub fn build<F>(&self, geometry: &Geometry<f64>, bounds: F) -> Result<Vec<ShapeRepresentation>>
    where
        F: FnOnce() -> Result<ExtrusionBounds>,
    {
        let mut applicable = Vec::new();
        for kind in self.flags.iter() {
            if self.applies(kind, geometry)? {
                applicable.push(kind);
            }
        }
        if applicable.is_empty() {
            return Ok(Vec::new());
        }

        let bounds = bounds()?;
        applicable
            .into_iter()
            .map(|kind| self.shape(kind, geometry, &bounds))
            .collect()
    }

    /// Capability check for one pairing: `false` when it is inapplicable
    fn applies(&self, kind: RepresentationKind, geometry: &Geometry<f64>) -> Result<bool> {
        let geometry_kind = GeometryKind::of(geometry);
        if let GeometryKind::Other(name) = geometry_kind {
            return Err(Error::unsupported(
                geometry_kind,
                kind,
                format!("no builder for {} geometries", name),
            ));
        }

        match capability(kind, geometry_kind) {
            Capability::Inapplicable => Ok(false),
            Capability::Unimplemented => Err(Error::NotImplemented {
                representation: kind,
                kind: geometry_kind,
            }),
            Capability::Supported => Ok(true),
        }
    }

    fn shape(
        &self,
        kind: RepresentationKind,
        geometry: &Geometry<f64>,
        bounds: &ExtrusionBounds,
    ) -> Result<ShapeRepresentation> {
        let geometry_kind = GeometryKind::of(geometry);
        match (kind, geometry) {
            (RepresentationKind::Axis, Geometry::Point(p)) => Ok(self.axis(p, bounds)),
            (RepresentationKind::Axis, Geometry::MultiPoint(mp)) => match mp.0.as_slice() {
                [p] => Ok(self.axis(p, bounds)),
                points => Err(Error::unsupported(
                    geometry_kind,
                    kind,
                    format!("expected exactly one point, found {}", points.len()),
                )),
            },
            (RepresentationKind::Surface, Geometry::LineString(line)) => self.surface(line, bounds),
            (RepresentationKind::Body, Geometry::Polygon(poly)) => {
                self.body(std::slice::from_ref(poly), bounds)
            }
            (RepresentationKind::Body, Geometry::MultiPolygon(mp)) => self.body(&mp.0, bounds),
            _ => Err(Error::unsupported(
                geometry_kind,
                kind,
                "no builder for this pairing",
            )),
        }
    }

    fn axis(&self, point: &Point<f64>, bounds: &ExtrusionBounds) -> ShapeRepresentation {
        let c = point.0;
        ShapeRepresentation::Axis(vec![
            self.transform.apply_coord(c, bounds.bottom),
            self.transform.apply_coord(c, bounds.top),
        ])
    }

    fn surface(&self, line: &LineString<f64>, bounds: &ExtrusionBounds) -> Result<ShapeRepresentation> {
        if line.0.len() < 2 {
            return Err(Error::unsupported(
                GeometryKind::LineString,
                RepresentationKind::Surface,
                format!("needs at least 2 vertices, found {}", line.0.len()),
            ));
        }

        let faces = line
            .lines()
            .map(|segment| Face {
                corners: [
                    self.transform.apply_coord(segment.start, bounds.bottom),
                    self.transform.apply_coord(segment.end, bounds.bottom),
                    self.transform.apply_coord(segment.end, bounds.top),
                    self.transform.apply_coord(segment.start, bounds.top),
                ],
            })
            .collect();
        Ok(ShapeRepresentation::Surface(faces))
    }

    fn body(&self, polygons: &[Polygon<f64>], bounds: &ExtrusionBounds) -> Result<ShapeRepresentation> {
        let depth = bounds.depth();
        if !(depth > 0.0) || !depth.is_finite() {
            return Err(Error::elevation(
                "top",
                format!(
                    "a body needs top above bottom, got bottom {} and top {}",
                    bounds.bottom, bounds.top
                ),
            ));
        }
        let base_z = self.transform.apply_z(bounds.bottom);

        let solids = polygons
            .iter()
            .map(|poly| {
                let profile = Profile2D::from_polygon(poly, self.transform)?;
                Ok(extrude_profile(profile, base_z, depth))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ShapeRepresentation::Body(solids))
    }
}
