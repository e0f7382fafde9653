// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC entities for built shape representations.

use gis2ifc_core::placement::{X_AXIS, Z_AXIS};
use gis2ifc_core::{write_axis2_placement, AttributeValue, EntityId, IfcDocument, IfcType};
use gis2ifc_geometry::{ExtrudedSolid, Face, Point2, Point3, ShapeRepresentation};

/// Write one `IfcShapeRepresentation` with its items
pub fn emit_representation(
    doc: &mut IfcDocument,
    context: EntityId,
    rep: &ShapeRepresentation,
) -> EntityId {
    let items: Vec<EntityId> = match rep {
        ShapeRepresentation::Axis(points) => vec![polyline_3d(doc, points)],
        ShapeRepresentation::Surface(faces) => vec![surface_model(doc, faces)],
        ShapeRepresentation::Body(solids) => solids.iter().map(|s| extruded_solid(doc, s)).collect(),
    };

    doc.add(
        IfcType::IfcShapeRepresentation,
        vec![
            AttributeValue::EntityRef(context),
            AttributeValue::string(rep.kind().identifier()),
            AttributeValue::string(rep.representation_type()),
            AttributeValue::refs(items),
        ],
    )
}

/// `IfcProductDefinitionShape` over `representations`; `None` when empty
pub fn emit_product_shape(doc: &mut IfcDocument, representations: &[EntityId]) -> Option<EntityId> {
    if representations.is_empty() {
        return None;
    }
    Some(doc.add(
        IfcType::IfcProductDefinitionShape,
        vec![
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::refs(representations.iter().copied()),
        ],
    ))
}

fn point_3d(doc: &mut IfcDocument, p: &Point3<f64>) -> EntityId {
    doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats([p.x, p.y, p.z])])
}

fn point_2d(doc: &mut IfcDocument, p: &Point2<f64>) -> EntityId {
    doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats([p.x, p.y])])
}

fn polyline_3d(doc: &mut IfcDocument, points: &[Point3<f64>]) -> EntityId {
    let ids: Vec<_> = points.iter().map(|p| point_3d(doc, p)).collect();
    doc.add(IfcType::IfcPolyline, vec![AttributeValue::refs(ids)])
}

fn polyline_2d(doc: &mut IfcDocument, points: &[Point2<f64>]) -> EntityId {
    let ids: Vec<_> = points.iter().map(|p| point_2d(doc, p)).collect();
    doc.add(IfcType::IfcPolyline, vec![AttributeValue::refs(ids)])
}

/// Faces grouped into one connected face set
fn surface_model(doc: &mut IfcDocument, faces: &[Face]) -> EntityId {
    let face_ids: Vec<_> = faces
        .iter()
        .map(|face| {
            let corners: Vec<_> = face.corners.iter().map(|c| point_3d(doc, c)).collect();
            let ring = doc.add(IfcType::IfcPolyLoop, vec![AttributeValue::refs(corners)]);
            let bound = doc.add(
                IfcType::IfcFaceOuterBound,
                vec![AttributeValue::EntityRef(ring), AttributeValue::boolean(true)],
            );
            doc.add(IfcType::IfcFace, vec![AttributeValue::refs([bound])])
        })
        .collect();

    let face_set = doc.add(IfcType::IfcConnectedFaceSet, vec![AttributeValue::refs(face_ids)]);
    doc.add(IfcType::IfcFaceBasedSurfaceModel, vec![AttributeValue::refs([face_set])])
}

fn extruded_solid(doc: &mut IfcDocument, solid: &ExtrudedSolid) -> EntityId {
    let outer = polyline_2d(doc, &solid.profile.outer);
    let profile = if solid.profile.has_voids() {
        let inner: Vec<_> = solid
            .profile
            .holes
            .iter()
            .map(|hole| polyline_2d(doc, hole))
            .collect();
        doc.add(
            IfcType::IfcArbitraryProfileDefWithVoids,
            vec![
                AttributeValue::enumeration("AREA"),
                AttributeValue::Null,
                AttributeValue::EntityRef(outer),
                AttributeValue::refs(inner),
            ],
        )
    } else {
        doc.add(
            IfcType::IfcArbitraryClosedProfileDef,
            vec![
                AttributeValue::enumeration("AREA"),
                AttributeValue::Null,
                AttributeValue::EntityRef(outer),
            ],
        )
    };

    let p = solid.position;
    let position = write_axis2_placement(doc, [p.x, p.y, p.z], Z_AXIS, X_AXIS);
    let d = solid.direction;
    let direction = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats([d.x, d.y, d.z])]);

    doc.add(
        IfcType::IfcExtrudedAreaSolid,
        vec![
            AttributeValue::EntityRef(profile),
            AttributeValue::EntityRef(position),
            AttributeValue::EntityRef(direction),
            AttributeValue::Float(solid.depth),
        ],
    )
}
