// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element composition: one feature in, one fully related element out.
//!
//! A feature is committed atomically. The document is checkpointed before
//! the first entity is written and rolled back if anything fails, so a
//! failing feature leaves no trace in the output.

use crate::attributes::{project, quantities, PropertyValue, Quantity};
use crate::config::ElementClass;
use crate::emit::{emit_product_shape, emit_representation};
use crate::error::Result;
use crate::hierarchy::{LayerContainer, SpatialHierarchy};
use gis2ifc_core::{
    AttributeValue, EntityId, Feature, IdAllocator, IfcDocument, IfcType, PlacementArena,
    PlacementKey,
};
use gis2ifc_geometry::{ElevationRange, ElevationSpec, ShapeBuilder};

/// Mutable output state shared by every feature of a conversion
pub struct OutputState<'a> {
    pub doc: &'a mut IfcDocument,
    pub ids: &'a mut dyn IdAllocator,
    pub placements: &'a mut PlacementArena,
}

pub struct ElementComposer<'a> {
    pub hierarchy: &'a SpatialHierarchy,
    pub builder: ShapeBuilder<'a>,
    pub bottom: &'a ElevationSpec,
    pub top: &'a ElevationSpec,
    pub element_class: ElementClass,
}

impl<'a> ElementComposer<'a> {
    /// Compose `feature` into `layer`; on error the output is left unchanged
    pub fn compose(
        &self,
        out: &mut OutputState<'_>,
        layer: &LayerContainer,
        range: &ElevationRange,
        feature: &Feature,
    ) -> Result<EntityId> {
        let checkpoint = out.doc.checkpoint();
        let mut placement = None;

        let result = self.write_element(out, layer, range, feature, &mut placement);
        if result.is_err() {
            out.doc.rollback(checkpoint);
            if let Some(key) = placement {
                out.placements.remove(key);
            }
        }
        result
    }

    fn write_element(
        &self,
        out: &mut OutputState<'_>,
        layer: &LayerContainer,
        range: &ElevationRange,
        feature: &Feature,
        placement: &mut Option<PlacementKey>,
    ) -> Result<EntityId> {
        let key = out
            .placements
            .add(out.doc, Some(layer.storey_placement), [0.0; 3])?;
        *placement = Some(key);

        // Elevations are only read when some representation applies
        let shapes = self
            .builder
            .build(&feature.geometry, || range.resolve(feature, self.bottom, self.top))?;

        let representations: Vec<_> = shapes
            .iter()
            .map(|shape| emit_representation(out.doc, self.hierarchy.context, shape))
            .collect();
        let product_shape = emit_product_shape(out.doc, &representations);

        let element = out.doc.add_rooted(
            out.ids,
            self.element_class.ifc_type(),
            vec![
                AttributeValue::EntityRef(self.hierarchy.owner_history),
                AttributeValue::string(format!(
                    "GIS2BIM Layer {}, Feature ID {}",
                    layer.name, feature.id
                )),
                AttributeValue::string("A GIS2BIM element"),
                AttributeValue::Null,
                AttributeValue::EntityRef(out.placements.entity(key)?),
                product_shape.into(),
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        );

        let properties = project(&feature.attributes);
        if !properties.is_empty() {
            self.attach_properties(out, element, &layer.name, &properties);
        }
        if let Some(quantity) = quantities(&feature.geometry) {
            self.attach_quantity(out, element, quantity);
        }

        self.hierarchy
            .aggregate(out.doc, out.ids, "Feature Space", layer.space, &[element]);
        self.hierarchy
            .contain(out.doc, out.ids, layer.storey, &[element]);

        tracing::debug!(
            layer = %layer.name,
            feature_id = feature.id,
            representations = representations.len(),
            "Element composed"
        );
        Ok(element)
    }

    fn attach_properties(
        &self,
        out: &mut OutputState<'_>,
        element: EntityId,
        layer: &str,
        properties: &[(String, PropertyValue)],
    ) {
        let values: Vec<_> = properties
            .iter()
            .map(|(name, value)| {
                out.doc.add(
                    IfcType::IfcPropertySingleValue,
                    vec![
                        AttributeValue::string(name.as_str()),
                        AttributeValue::Null,
                        value.to_attribute(),
                        AttributeValue::Null,
                    ],
                )
            })
            .collect();

        let set = out.doc.add_rooted(
            out.ids,
            IfcType::IfcPropertySet,
            vec![
                AttributeValue::EntityRef(self.hierarchy.owner_history),
                AttributeValue::string(format!("ePset_GIS2BIM_{}", layer)),
                AttributeValue::Null,
                AttributeValue::refs(values),
            ],
        );
        self.define_by(out, element, set);
    }

    fn attach_quantity(&self, out: &mut OutputState<'_>, element: EntityId, quantity: Quantity) {
        let measure = out.doc.add(
            quantity.ifc_type(),
            vec![
                AttributeValue::string(quantity.name()),
                AttributeValue::string(quantity.description()),
                AttributeValue::Null,
                AttributeValue::Float(quantity.value()),
                AttributeValue::Null,
            ],
        );
        let set = out.doc.add_rooted(
            out.ids,
            IfcType::IfcElementQuantity,
            vec![
                AttributeValue::EntityRef(self.hierarchy.owner_history),
                AttributeValue::string("BaseQuantities"),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs([measure]),
            ],
        );
        self.define_by(out, element, set);
    }

    fn define_by(&self, out: &mut OutputState<'_>, element: EntityId, definition: EntityId) {
        out.doc.add_rooted(
            out.ids,
            IfcType::IfcRelDefinesByProperties,
            vec![
                AttributeValue::EntityRef(self.hierarchy.owner_history),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs([element]),
                AttributeValue::EntityRef(definition),
            ],
        );
    }
}
