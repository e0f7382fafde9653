// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute projection and quantities
//!
//! Feature attributes become typed IFC property values; the geometry yields
//! at most one base quantity (area or length).

use geo::{Area, EuclideanLength, Geometry};
use gis2ifc_core::{AttributeValue, FeatureValue, IfcType};

/// Typed nominal value of an `IfcPropertySingleValue`
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// Null attribute, written as `$`
    Empty,
}

impl From<&FeatureValue> for PropertyValue {
    fn from(value: &FeatureValue) -> Self {
        match value {
            FeatureValue::Boolean(b) => PropertyValue::Boolean(*b),
            FeatureValue::Integer(i) => PropertyValue::Integer(*i),
            FeatureValue::Real(r) => PropertyValue::Real(*r),
            FeatureValue::Text(s) => PropertyValue::Text(s.clone()),
            FeatureValue::Null => PropertyValue::Empty,
        }
    }
}

impl PropertyValue {
    /// Defined type the value is wrapped in
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            PropertyValue::Boolean(_) => Some("IFCBOOLEAN"),
            PropertyValue::Integer(_) => Some("IFCINTEGER"),
            PropertyValue::Real(_) => Some("IFCREAL"),
            PropertyValue::Text(_) => Some("IFCTEXT"),
            PropertyValue::Empty => None,
        }
    }

    pub fn to_attribute(&self) -> AttributeValue {
        let inner = match self {
            PropertyValue::Boolean(b) => AttributeValue::boolean(*b),
            PropertyValue::Integer(i) => AttributeValue::Integer(*i),
            PropertyValue::Real(r) => AttributeValue::Float(*r),
            PropertyValue::Text(s) => AttributeValue::string(s.as_str()),
            PropertyValue::Empty => return AttributeValue::Null,
        };
        match self.type_name() {
            Some(name) => AttributeValue::typed(name, inner),
            None => AttributeValue::Null,
        }
    }
}

/// Attributes in source order, each with its typed value
pub fn project(attributes: &[(String, FeatureValue)]) -> Vec<(String, PropertyValue)> {
    attributes
        .iter()
        .map(|(name, value)| (name.clone(), PropertyValue::from(value)))
        .collect()
}

/// Base quantity derived from a feature geometry, in source planar units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Area(f64),
    Length(f64),
}

impl Quantity {
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Area(_) => "Area",
            Quantity::Length(_) => "Length",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quantity::Area(_) => "Area of the GIS feature",
            Quantity::Length(_) => "Length of the GIS feature",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Quantity::Area(v) | Quantity::Length(v) => *v,
        }
    }

    pub fn ifc_type(&self) -> IfcType {
        match self {
            Quantity::Area(_) => IfcType::IfcQuantityArea,
            Quantity::Length(_) => IfcType::IfcQuantityLength,
        }
    }
}

/// Area for polygons (voids subtracted), length for lines, nothing otherwise
pub fn quantities(geometry: &Geometry<f64>) -> Option<Quantity> {
    match geometry {
        Geometry::Polygon(p) => Some(Quantity::Area(p.unsigned_area())),
        Geometry::MultiPolygon(mp) => Some(Quantity::Area(mp.unsigned_area())),
        Geometry::LineString(l) => Some(Quantity::Length(l.euclidean_length())),
        Geometry::MultiLineString(ml) => Some(Quantity::Length(ml.euclidean_length())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, point, polygon, MultiPolygon};

    #[test]
    fn values_keep_their_type() {
        let attributes = vec![
            ("flag".to_string(), FeatureValue::Boolean(true)),
            ("count".to_string(), FeatureValue::Integer(5)),
            ("ratio".to_string(), FeatureValue::Real(5.0)),
            ("label".to_string(), FeatureValue::from("x")),
            ("missing".to_string(), FeatureValue::Null),
        ];
        let projected = project(&attributes);

        assert_eq!(projected[0], ("flag".to_string(), PropertyValue::Boolean(true)));
        assert_eq!(projected[1].1, PropertyValue::Integer(5));
        assert_eq!(projected[2].1, PropertyValue::Real(5.0));
        assert_eq!(projected[3].1, PropertyValue::Text("x".to_string()));
        assert_eq!(projected[4].1, PropertyValue::Empty);
    }

    #[test]
    fn booleans_are_not_integers() {
        let value = PropertyValue::from(&FeatureValue::Boolean(false));
        assert_eq!(value.type_name(), Some("IFCBOOLEAN"));

        let mut out = String::new();
        value.to_attribute().write_step(&mut out);
        assert_eq!(out, "IFCBOOLEAN(.F.)");
    }

    #[test]
    fn nominal_values_encode() {
        let encode = |v: PropertyValue| {
            let mut out = String::new();
            v.to_attribute().write_step(&mut out);
            out
        };
        assert_eq!(encode(PropertyValue::Integer(5)), "IFCINTEGER(5)");
        assert_eq!(encode(PropertyValue::Real(5.0)), "IFCREAL(5.)");
        assert_eq!(encode(PropertyValue::Text("x".into())), "IFCTEXT('x')");
        assert_eq!(encode(PropertyValue::Empty), "$");
    }

    #[test]
    fn polygon_area_subtracts_holes() {
        let poly = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 4.0, y: 2.0), (x: 4.0, y: 4.0), (x: 2.0, y: 4.0)]],
        );
        let q = quantities(&poly.clone().into()).unwrap();
        assert_eq!(q.name(), "Area");
        assert_relative_eq!(q.value(), 96.0);

        let mp = MultiPolygon::new(vec![poly.clone(), poly]);
        assert_relative_eq!(quantities(&mp.into()).unwrap().value(), 192.0);
    }

    #[test]
    fn lines_measure_length() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0), (x: 3.0, y: 10.0)];
        let q = quantities(&line.into()).unwrap();
        assert_eq!(q.ifc_type(), IfcType::IfcQuantityLength);
        assert_relative_eq!(q.value(), 11.0);
    }

    #[test]
    fn points_have_no_quantity() {
        assert!(quantities(&point!(x: 1.0, y: 1.0).into()).is_none());
    }
}
