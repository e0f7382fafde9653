// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D profile definitions for extrusion

use crate::error::{Error, Result};
use crate::transform::CoordinateTransform;
use geo::{LineString, Polygon};
use nalgebra::Point2;

/// 2D profile with optional voids, in model coordinates. Rings are closed:
/// the last point repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    pub outer: Vec<Point2<f64>>,
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// Exterior ring as boundary, interior rings as voids
    pub fn from_polygon(polygon: &Polygon<f64>, transform: &CoordinateTransform) -> Result<Self> {
        let outer = ring(polygon.exterior(), transform)
            .map_err(|e| Error::InvalidProfile(format!("outer boundary {}", e)))?;
        let mut profile = Profile2D::new(outer);

        for (i, interior) in polygon.interiors().iter().enumerate() {
            let hole = ring(interior, transform)
                .map_err(|e| Error::InvalidProfile(format!("void {} {}", i, e)))?;
            profile.add_hole(hole);
        }
        Ok(profile)
    }

    pub fn has_voids(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Enclosed area, voids subtracted
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| shoelace(h).abs()).sum();
        shoelace(&self.outer).abs() - holes
    }
}

fn ring(line: &LineString<f64>, transform: &CoordinateTransform) -> std::result::Result<Vec<Point2<f64>>, String> {
    let mut points: Vec<_> = line
        .coords()
        .map(|c| transform.apply_xy(c.x, c.y))
        .collect();

    if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
        if first != last {
            points.push(first);
        }
    }
    // Three distinct corners plus the closing point
    if points.len() < 4 {
        return Err(format!("has {} points, at least 3 distinct are required", points.len().saturating_sub(1)));
    }
    Ok(points)
}

fn shoelace(points: &[Point2<f64>]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}
