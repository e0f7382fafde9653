// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parent-relative placements.
//!
//! Placements are kept in a slotmap arena. Each entry remembers its parent
//! key and the `IfcLocalPlacement` written for it, so children can be
//! created bottom-up without holding references into the document.

use crate::document::{EntityId, IfcDocument};
use crate::error::{Error, Result};
use crate::schema::IfcType;
use crate::value::AttributeValue;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a placement in a [`PlacementArena`]
    pub struct PlacementKey;
}

pub const Z_AXIS: [f64; 3] = [0.0, 0.0, 1.0];
pub const X_AXIS: [f64; 3] = [1.0, 0.0, 0.0];

/// One `IfcLocalPlacement`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlacement {
    pub position: [f64; 3],
    pub axis: [f64; 3],
    pub ref_direction: [f64; 3],
    /// Non-owning link to the placement this one is relative to
    pub parent: Option<PlacementKey>,
    /// The written `IfcLocalPlacement`
    pub entity: EntityId,
}

#[derive(Debug, Default)]
pub struct PlacementArena {
    placements: SlotMap<PlacementKey, LocalPlacement>,
}

impl PlacementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an axis-aligned placement at `position`, relative to `parent`
    pub fn add(
        &mut self,
        doc: &mut IfcDocument,
        parent: Option<PlacementKey>,
        position: [f64; 3],
    ) -> Result<PlacementKey> {
        let relative_to = match parent {
            Some(key) => AttributeValue::EntityRef(self.entity(key)?),
            None => AttributeValue::Null,
        };

        let axis2 = write_axis2_placement(doc, position, Z_AXIS, X_AXIS);
        let entity = doc.add(
            IfcType::IfcLocalPlacement,
            vec![relative_to, AttributeValue::EntityRef(axis2)],
        );

        Ok(self.placements.insert(LocalPlacement {
            position,
            axis: Z_AXIS,
            ref_direction: X_AXIS,
            parent,
            entity,
        }))
    }

    pub fn get(&self, key: PlacementKey) -> Option<&LocalPlacement> {
        self.placements.get(key)
    }

    /// The `IfcLocalPlacement` written for `key`
    pub fn entity(&self, key: PlacementKey) -> Result<EntityId> {
        self.get(key)
            .map(|p| p.entity)
            .ok_or(Error::UnknownPlacement)
    }

    /// Forget a placement whose entities were rolled back
    pub fn remove(&mut self, key: PlacementKey) -> Option<LocalPlacement> {
        self.placements.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Write `IfcAxis2Placement3D` with its point and directions
pub fn write_axis2_placement(
    doc: &mut IfcDocument,
    location: [f64; 3],
    axis: [f64; 3],
    ref_direction: [f64; 3],
) -> EntityId {
    let point = doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats(location)]);
    let axis = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats(axis)]);
    let ref_direction = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats(ref_direction)]);
    doc.add(
        IfcType::IfcAxis2Placement3D,
        vec![
            AttributeValue::EntityRef(point),
            AttributeValue::EntityRef(axis),
            AttributeValue::EntityRef(ref_direction),
        ],
    )
}
