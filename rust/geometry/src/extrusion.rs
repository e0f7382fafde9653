// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion of 2D profiles along the global Z axis

use crate::profile::Profile2D;
use nalgebra::{Point3, Vector3};

/// Swept solid: `profile` placed at `position`, extruded by `depth` along
/// `direction`
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedSolid {
    pub profile: Profile2D,
    pub position: Point3<f64>,
    pub direction: Vector3<f64>,
    pub depth: f64,
}

/// Extrude a profile upwards from `base_z`. `depth` must be positive;
/// callers validate it against the elevations it came from.
#[inline]
pub fn extrude_profile(profile: Profile2D, base_z: f64, depth: f64) -> ExtrudedSolid {
    debug_assert!(depth > 0.0 && depth.is_finite());
    ExtrudedSolid {
        profile,
        position: Point3::new(0.0, 0.0, base_z),
        direction: Vector3::z(),
        depth,
    }
}

impl ExtrudedSolid {
    pub fn volume(&self) -> f64 {
        self.profile.area() * self.depth
    }
}
