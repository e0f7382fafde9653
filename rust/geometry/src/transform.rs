// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source-to-model coordinate transform
//!
//! A translation by `(-eastings, -northings, -orthogonal_height)` followed by
//! a counter-clockwise rotation about the model origin. Every coordinate the
//! converter emits passes through [`CoordinateTransform::apply`].

use geo::Coord;
use gis2ifc_core::GeoReference;
use nalgebra::{Point2, Point3, Rotation2, Vector2};

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    pub eastings: f64,
    pub northings: f64,
    pub orthogonal_height: f64,
    pub rotation_degrees: f64,
    rotation: Rotation2<f64>,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateTransform {
    pub fn build(eastings: f64, northings: f64, orthogonal_height: f64, rotation_degrees: f64) -> Self {
        Self {
            eastings,
            northings,
            orthogonal_height,
            rotation_degrees,
            rotation: Rotation2::new(rotation_degrees.to_radians()),
        }
    }

    pub fn identity() -> Self {
        Self::build(0.0, 0.0, 0.0, 0.0)
    }

    /// All parameters zero
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.eastings == 0.0
            && self.northings == 0.0
            && self.orthogonal_height == 0.0
            && self.rotation_degrees == 0.0
    }

    /// Map a source point into model space
    #[inline]
    pub fn apply(&self, p: Point3<f64>) -> Point3<f64> {
        if self.is_identity() {
            return p;
        }
        let planar = self.apply_xy(p.x, p.y);
        Point3::new(planar.x, planar.y, self.apply_z(p.z))
    }

    #[inline]
    pub fn apply_xy(&self, x: f64, y: f64) -> Point2<f64> {
        if self.is_identity() {
            return Point2::new(x, y);
        }
        let shifted = Vector2::new(x - self.eastings, y - self.northings);
        Point2::from(self.rotation * shifted)
    }

    /// Elevations are only shifted; the rotation is about the vertical axis
    #[inline]
    pub fn apply_z(&self, z: f64) -> f64 {
        z - self.orthogonal_height
    }

    #[inline]
    pub fn apply_coord(&self, c: Coord<f64>, z: f64) -> Point3<f64> {
        self.apply(Point3::new(c.x, c.y, z))
    }

    /// Map conversion that undoes this transform (model to source coordinates)
    pub fn georeference(&self, crs_name: Option<String>) -> GeoReference {
        let angle = self.rotation_degrees.to_radians();
        GeoReference {
            crs_name,
            eastings: self.eastings,
            northings: self.northings,
            orthogonal_height: self.orthogonal_height,
            x_axis_abscissa: angle.cos(),
            x_axis_ordinate: -angle.sin(),
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_exact() {
        let t = CoordinateTransform::build(0.0, 0.0, 0.0, 0.0);
        assert!(t.is_identity());
        let p = Point3::new(2_600_123.456_789, 1_200_987.654_321, 412.125);
        assert_eq!(t.apply(p), p);
    }

    #[test]
    fn translates_then_rotates() {
        let t = CoordinateTransform::build(100.0, 200.0, 10.0, 90.0);
        let p = t.apply(Point3::new(110.0, 200.0, 15.0));
        // (10, 0) turned counter-clockwise by 90 degrees
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 5.0);
    }

    #[test]
    fn georeference_maps_back_to_source() {
        let t = CoordinateTransform::build(2_600_000.0, 1_200_000.0, 400.0, 33.0);
        let source = Point3::new(2_600_050.0, 1_200_025.0, 420.0);
        let local = t.apply(source);

        let georef = t.georeference(Some("EPSG:2056".to_string()));
        let (e, n, h) = georef.local_to_map(local.x, local.y, local.z);
        assert_relative_eq!(e, source.x, epsilon = 1e-6);
        assert_relative_eq!(n, source.y, epsilon = 1e-6);
        assert_relative_eq!(h, source.z, epsilon = 1e-9);
    }
}
