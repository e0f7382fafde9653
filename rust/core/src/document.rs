// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory IFC document.
//!
//! Entities are appended in creation order and numbered `#1, #2, ...`. The
//! numbering is dense, which makes rolling back to a checkpoint a plain
//! truncation.

use crate::error::{Error, Result};
use crate::guid::{GlobalId, IdAllocator};
use crate::schema::IfcType;
use crate::value::AttributeValue;
use crate::writer::FileHeader;
use std::fmt;

/// STEP instance name (`#n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single entity instance
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub ifc_type: IfcType,
    pub attributes: Vec<AttributeValue>,
}

impl Entity {
    /// Get attribute by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    #[inline]
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|a| a.as_entity_ref())
    }

    #[inline]
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|a| a.as_string())
    }

    #[inline]
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|a| a.as_float())
    }

    #[inline]
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|a| a.as_list())
    }

    /// GlobalId of a rooted entity (attribute 0)
    pub fn global_id(&self) -> Option<&str> {
        if self.ifc_type.is_rooted() {
            self.get_string(0)
        } else {
            None
        }
    }
}

/// Marks a document length to roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Append-only IFC document
#[derive(Debug, Clone, Default)]
pub struct IfcDocument {
    pub header: FileHeader,
    entities: Vec<Entity>,
}

impl IfcDocument {
    pub fn new(header: FileHeader) -> Self {
        Self {
            header,
            entities: Vec::new(),
        }
    }

    /// Append an entity and return its instance name
    pub fn add(&mut self, ifc_type: IfcType, attributes: Vec<AttributeValue>) -> EntityId {
        let id = EntityId(self.entities.len() as u32 + 1);
        self.entities.push(Entity {
            id,
            ifc_type,
            attributes,
        });
        id
    }

    /// Append a rooted entity; a fresh GlobalId is prepended to `attributes`
    pub fn add_rooted(
        &mut self,
        ids: &mut dyn IdAllocator,
        ifc_type: IfcType,
        attributes: Vec<AttributeValue>,
    ) -> EntityId {
        let guid: GlobalId = ids.allocate();
        let mut all = Vec::with_capacity(attributes.len() + 1);
        all.push(AttributeValue::String(guid.to_string()));
        all.extend(attributes);
        self.add(ifc_type, all)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.entities.get(index)
    }

    /// Like [`get`](Self::get), but a missing entity is an error
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.get(id).ok_or(Error::UnknownEntity(id.0))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn by_type(&self, ifc_type: IfcType) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.ifc_type == ifc_type)
    }

    pub fn count(&self, ifc_type: IfcType) -> usize {
        self.by_type(ifc_type).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entities.len())
    }

    /// Drop every entity created after `checkpoint`
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.entities.truncate(checkpoint.0);
    }

    /// Entities whose attribute list references `target` anywhere
    pub fn referencing(&self, target: EntityId) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.attributes.iter().any(|a| references(a, target)))
    }
}

fn references(value: &AttributeValue, target: EntityId) -> bool {
    match value {
        AttributeValue::EntityRef(id) => *id == target,
        AttributeValue::List(items) => items.iter().any(|v| references(v, target)),
        AttributeValue::Typed(_, inner) => references(inner, target),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guid::SequentialAllocator;

    #[test]
    fn ids_are_dense_and_one_based() {
        let mut doc = IfcDocument::default();
        let a = doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats([0.0, 0.0])]);
        let b = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats([0.0, 0.0, 1.0])]);
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert_eq!(doc.entity(b).unwrap().ifc_type, IfcType::IfcDirection);
        assert!(doc.get(EntityId(0)).is_none());
        assert!(doc.entity(EntityId(9)).is_err());
    }

    #[test]
    fn rollback_discards_later_entities() {
        let mut doc = IfcDocument::default();
        doc.add(IfcType::IfcCartesianPoint, vec![]);
        let checkpoint = doc.checkpoint();
        doc.add(IfcType::IfcCartesianPoint, vec![]);
        doc.add(IfcType::IfcPolyline, vec![]);
        doc.rollback(checkpoint);

        assert_eq!(doc.len(), 1);
        let next = doc.add(IfcType::IfcDirection, vec![]);
        assert_eq!(next, EntityId(2));
    }

    #[test]
    fn rooted_entities_get_a_global_id() {
        let mut doc = IfcDocument::default();
        let mut ids = SequentialAllocator::new(1);
        let site = doc.add_rooted(
            &mut ids,
            IfcType::IfcSite,
            vec![AttributeValue::Null, AttributeValue::string("Site")],
        );
        let entity = doc.entity(site).unwrap();
        assert_eq!(entity.global_id().map(str::len), Some(22));
        assert_eq!(entity.get_string(2), Some("Site"));
    }

    #[test]
    fn finds_referencing_entities() {
        let mut doc = IfcDocument::default();
        let p = doc.add(IfcType::IfcCartesianPoint, vec![]);
        doc.add(IfcType::IfcPolyline, vec![AttributeValue::refs([p, p])]);
        doc.add(IfcType::IfcDirection, vec![]);
        assert_eq!(doc.referencing(p).count(), 1);
    }
}
