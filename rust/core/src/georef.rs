// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map conversion record.
//!
//! `IfcMapConversion` plus `IfcProjectedCRS`: how model coordinates map back
//! to the map coordinates the features came from.

use crate::document::{EntityId, IfcDocument};
use crate::schema::IfcType;
use crate::value::AttributeValue;

/// Model-to-map conversion: scale, rotate, then offset
#[derive(Debug, Clone, PartialEq)]
pub struct GeoReference {
    /// Target CRS, written as `"Local"` when unset
    pub crs_name: Option<String>,
    pub eastings: f64,
    pub northings: f64,
    pub orthogonal_height: f64,
    /// Model x axis expressed in map axes
    pub x_axis_abscissa: f64,
    pub x_axis_ordinate: f64,
    pub scale: f64,
}

impl Default for GeoReference {
    fn default() -> Self {
        Self {
            crs_name: None,
            eastings: 0.0,
            northings: 0.0,
            orthogonal_height: 0.0,
            x_axis_abscissa: 1.0,
            x_axis_ordinate: 0.0,
            scale: 1.0,
        }
    }
}

impl GeoReference {
    fn axis(&self) -> (f64, f64) {
        (self.x_axis_abscissa, self.x_axis_ordinate)
    }

    pub fn local_to_map(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let (c, s) = self.axis();
        let (rx, ry) = (x * c - y * s, x * s + y * c);
        (
            self.eastings + self.scale * rx,
            self.northings + self.scale * ry,
            self.orthogonal_height + z,
        )
    }

    /// Write `IfcProjectedCRS` and `IfcMapConversion` for `context`
    pub fn write(&self, doc: &mut IfcDocument, context: EntityId) -> EntityId {
        let crs = doc.add(
            IfcType::IfcProjectedCRS,
            vec![
                AttributeValue::string(self.crs_name.as_deref().unwrap_or("Local")),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        );
        doc.add(
            IfcType::IfcMapConversion,
            vec![
                AttributeValue::EntityRef(context),
                AttributeValue::EntityRef(crs),
                AttributeValue::Float(self.eastings),
                AttributeValue::Float(self.northings),
                AttributeValue::Float(self.orthogonal_height),
                AttributeValue::Float(self.x_axis_abscissa),
                AttributeValue::Float(self.x_axis_ordinate),
                AttributeValue::Float(self.scale),
            ],
        )
    }

    /// Read the first map conversion of a document back
    pub fn read(doc: &IfcDocument) -> Option<GeoReference> {
        let conversion = doc.by_type(IfcType::IfcMapConversion).next()?;

        // SourceCRS, TargetCRS, Eastings, Northings, OrthogonalHeight,
        // XAxisAbscissa, XAxisOrdinate, Scale
        let mut georef = GeoReference {
            eastings: conversion.get_float(2).unwrap_or(0.0),
            northings: conversion.get_float(3).unwrap_or(0.0),
            orthogonal_height: conversion.get_float(4).unwrap_or(0.0),
            ..GeoReference::default()
        };
        let optional = [
            (5, &mut georef.x_axis_abscissa),
            (6, &mut georef.x_axis_ordinate),
            (7, &mut georef.scale),
        ];
        for (index, field) in optional {
            if let Some(value) = conversion.get_float(index) {
                *field = value;
            }
        }

        georef.crs_name = conversion
            .get_ref(1)
            .and_then(|id| doc.get(id))
            .and_then(|crs| crs.get_string(0))
            .map(str::to_string);

        Some(georef)
    }
}
