// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hierarchy: project, site, building, and one storey plus one
//! space per input layer.

use crate::config::ProjectInfo;
use crate::error::Result;
use gis2ifc_core::placement::{X_AXIS, Z_AXIS};
use gis2ifc_core::{
    write_axis2_placement, AttributeValue, EntityId, GeoReference, IdAllocator, IfcDocument,
    IfcType, PlacementArena, PlacementKey,
};

/// Entities created once per document
#[derive(Debug, Clone)]
pub struct SpatialHierarchy {
    pub owner_history: EntityId,
    pub context: EntityId,
    pub project: EntityId,
    pub site: EntityId,
    pub building: EntityId,
    pub site_placement: PlacementKey,
    pub building_placement: PlacementKey,
}

/// Storey and space holding the elements of one layer
#[derive(Debug, Clone)]
pub struct LayerContainer {
    pub name: String,
    pub storey: EntityId,
    pub storey_placement: PlacementKey,
    pub space: EntityId,
}

impl SpatialHierarchy {
    /// Write the document scaffolding and the project/site/building tree.
    /// `georef` adds `IfcMapConversion` to the model context.
    pub fn build(
        doc: &mut IfcDocument,
        ids: &mut dyn IdAllocator,
        placements: &mut PlacementArena,
        info: &ProjectInfo,
        georef: Option<&GeoReference>,
    ) -> Result<Self> {
        let owner_history = owner_history(doc, info);
        let units = unit_assignment(doc);
        let context = model_context(doc);
        if let Some(georef) = georef {
            georef.write(doc, context);
        }

        let project = doc.add_rooted(
            ids,
            IfcType::IfcProject,
            vec![
                AttributeValue::EntityRef(owner_history),
                AttributeValue::string(info.name.as_str()),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs([context]),
                AttributeValue::EntityRef(units),
            ],
        );

        let site_placement = placements.add(doc, None, [0.0; 3])?;
        let site = doc.add_rooted(
            ids,
            IfcType::IfcSite,
            vec![
                AttributeValue::EntityRef(owner_history),
                AttributeValue::string(info.site_name.as_str()),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::EntityRef(placements.entity(site_placement)?),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::enumeration("ELEMENT"),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        );

        let building_placement = placements.add(doc, Some(site_placement), [0.0; 3])?;
        let building = doc.add_rooted(
            ids,
            IfcType::IfcBuilding,
            vec![
                AttributeValue::EntityRef(owner_history),
                AttributeValue::string(info.building_name.as_str()),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::EntityRef(placements.entity(building_placement)?),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::enumeration("ELEMENT"),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        );

        let hierarchy = Self {
            owner_history,
            context,
            project,
            site,
            building,
            site_placement,
            building_placement,
        };
        hierarchy.aggregate(doc, ids, "Project Container", project, &[site]);
        hierarchy.aggregate(doc, ids, "Site Container", site, &[building]);

        tracing::debug!(entities = doc.len(), "Spatial hierarchy created");
        Ok(hierarchy)
    }

    /// Storey under the building and space under the site, both named `name`
    pub fn add_layer(
        &self,
        doc: &mut IfcDocument,
        ids: &mut dyn IdAllocator,
        placements: &mut PlacementArena,
        name: &str,
    ) -> Result<LayerContainer> {
        let storey_placement = placements.add(doc, Some(self.building_placement), [0.0; 3])?;
        let storey = doc.add_rooted(
            ids,
            IfcType::IfcBuildingStorey,
            vec![
                AttributeValue::EntityRef(self.owner_history),
                AttributeValue::string(name),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::EntityRef(placements.entity(storey_placement)?),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::enumeration("ELEMENT"),
                AttributeValue::Float(0.0),
            ],
        );
        self.aggregate(doc, ids, "Building Container", self.building, &[storey]);

        let space = doc.add_rooted(
            ids,
            IfcType::IfcSpace,
            vec![
                AttributeValue::EntityRef(self.owner_history),
                AttributeValue::string(name),
                AttributeValue::string("GIS2BIM layer space"),
                AttributeValue::Null,
                AttributeValue::EntityRef(placements.entity(self.site_placement)?),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::enumeration("ELEMENT"),
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        );
        self.aggregate(doc, ids, "Layer Space Container", self.site, &[space]);

        tracing::debug!(layer = name, "Layer storey and space created");
        Ok(LayerContainer {
            name: name.to_string(),
            storey,
            storey_placement,
            space,
        })
    }

    pub fn aggregate(
        &self,
        doc: &mut IfcDocument,
        ids: &mut dyn IdAllocator,
        name: &str,
        relating: EntityId,
        related: &[EntityId],
    ) -> EntityId {
        doc.add_rooted(
            ids,
            IfcType::IfcRelAggregates,
            vec![
                AttributeValue::EntityRef(self.owner_history),
                AttributeValue::string(name),
                AttributeValue::Null,
                AttributeValue::EntityRef(relating),
                AttributeValue::refs(related.iter().copied()),
            ],
        )
    }

    pub fn contain(
        &self,
        doc: &mut IfcDocument,
        ids: &mut dyn IdAllocator,
        structure: EntityId,
        elements: &[EntityId],
    ) -> EntityId {
        doc.add_rooted(
            ids,
            IfcType::IfcRelContainedInSpatialStructure,
            vec![
                AttributeValue::EntityRef(self.owner_history),
                AttributeValue::string("Building Storey Container"),
                AttributeValue::Null,
                AttributeValue::refs(elements.iter().copied()),
                AttributeValue::EntityRef(structure),
            ],
        )
    }
}

fn owner_history(doc: &mut IfcDocument, info: &ProjectInfo) -> EntityId {
    let opt = |s: &str| AttributeValue::opt_string(Some(s).filter(|s| !s.is_empty()));

    let person = doc.add(
        IfcType::IfcPerson,
        vec![
            AttributeValue::Null,
            opt(&info.author),
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
        ],
    );
    let organization_name = if info.organization.is_empty() {
        "GIS2BIM"
    } else {
        info.organization.as_str()
    };
    let organization = doc.add(
        IfcType::IfcOrganization,
        vec![
            AttributeValue::Null,
            AttributeValue::string(organization_name),
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
        ],
    );
    let person_and_org = doc.add(
        IfcType::IfcPersonAndOrganization,
        vec![
            AttributeValue::EntityRef(person),
            AttributeValue::EntityRef(organization),
            AttributeValue::Null,
        ],
    );
    let application = doc.add(
        IfcType::IfcApplication,
        vec![
            AttributeValue::EntityRef(organization),
            AttributeValue::string(env!("CARGO_PKG_VERSION")),
            AttributeValue::string("gis2ifc"),
            AttributeValue::string("gis2ifc"),
        ],
    );
    let created = doc.header.timestamp.timestamp();
    doc.add(
        IfcType::IfcOwnerHistory,
        vec![
            AttributeValue::EntityRef(person_and_org),
            AttributeValue::EntityRef(application),
            AttributeValue::Null,
            AttributeValue::enumeration("ADDED"),
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Integer(created),
        ],
    )
}

/// Metre, square metre, cubic metre, radian
fn unit_assignment(doc: &mut IfcDocument) -> EntityId {
    let units: Vec<_> = [
        ("LENGTHUNIT", "METRE"),
        ("AREAUNIT", "SQUARE_METRE"),
        ("VOLUMEUNIT", "CUBIC_METRE"),
        ("PLANEANGLEUNIT", "RADIAN"),
    ]
    .into_iter()
    .map(|(unit_type, name)| {
        doc.add(
            IfcType::IfcSIUnit,
            vec![
                AttributeValue::Derived,
                AttributeValue::enumeration(unit_type),
                AttributeValue::Null,
                AttributeValue::enumeration(name),
            ],
        )
    })
    .collect();
    doc.add(IfcType::IfcUnitAssignment, vec![AttributeValue::refs(units)])
}

/// 3D model context with world coordinate system and true north
fn model_context(doc: &mut IfcDocument) -> EntityId {
    let world = write_axis2_placement(doc, [0.0; 3], Z_AXIS, X_AXIS);
    let true_north = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats([0.0, 1.0])]);
    doc.add(
        IfcType::IfcGeometricRepresentationContext,
        vec![
            AttributeValue::Null,
            AttributeValue::string("Model"),
            AttributeValue::Integer(3),
            AttributeValue::Float(1.0e-5),
            AttributeValue::EntityRef(world),
            AttributeValue::EntityRef(true_north),
        ],
    )
}
