// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector input model: datasets, layers and features.

use geo::Geometry;
use std::fmt;

/// Attribute value as read from the source dataset
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl FeatureValue {
    /// Numeric reading of the value: integers, reals and numeric text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Real(r) => Some(*r),
            FeatureValue::Text(s) => s.trim().parse().ok(),
            FeatureValue::Boolean(_) | FeatureValue::Null => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Boolean(b) => write!(f, "{}", b),
            FeatureValue::Integer(i) => write!(f, "{}", i),
            FeatureValue::Real(r) => write!(f, "{}", r),
            FeatureValue::Text(s) => f.write_str(s),
            FeatureValue::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Boolean(v)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Integer(v)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Real(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

/// Geometry kinds the converter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    /// Any other `geo` variant (Line, Rect, Triangle, GeometryCollection)
    Other(&'static str),
}

impl GeometryKind {
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::Line(_) => GeometryKind::Other("Line"),
            Geometry::Rect(_) => GeometryKind::Other("Rect"),
            Geometry::Triangle(_) => GeometryKind::Other("Triangle"),
            Geometry::GeometryCollection(_) => GeometryKind::Other("GeometryCollection"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::Other(name) => *name,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of a vector layer
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: i64,
    pub geometry: Geometry<f64>,
    /// Attributes in source order
    pub attributes: Vec<(String, FeatureValue)>,
}

impl Feature {
    pub fn new(id: i64, geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            id,
            geometry: geometry.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute insertion
    pub fn with_attribute(mut self, name: &str, value: impl Into<FeatureValue>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&FeatureValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        GeometryKind::of(&self.geometry)
    }
}

/// Named collection of features sharing a schema
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub features: Vec<Feature>,
}

impl Layer {
    pub fn new(name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }
}

/// All layers of one source dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub layers: Vec<Layer>,
}

impl Dataset {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, Rect};

    #[test]
    fn numeric_reading_of_values() {
        assert_eq!(FeatureValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FeatureValue::Real(2.5).as_f64(), Some(2.5));
        assert_eq!(FeatureValue::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(FeatureValue::from("roof").as_f64(), None);
        assert_eq!(FeatureValue::Boolean(true).as_f64(), None);
        assert_eq!(FeatureValue::Null.as_f64(), None);
    }

    #[test]
    fn attribute_lookup_keeps_order() {
        let feature = Feature::new(1, point!(x: 1.0, y: 2.0))
            .with_attribute("b", 1i64)
            .with_attribute("a", "x");
        assert_eq!(feature.attributes[0].0, "b");
        assert_eq!(feature.attribute("a"), Some(&FeatureValue::from("x")));
        assert!(feature.attribute("missing").is_none());
    }

    #[test]
    fn geometry_kinds() {
        let line = Feature::new(2, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        assert_eq!(line.geometry_kind(), GeometryKind::LineString);

        let rect = Feature::new(3, Rect::new((0.0, 0.0), (1.0, 1.0)));
        assert_eq!(rect.geometry_kind(), GeometryKind::Other("Rect"));
        assert_eq!(rect.geometry_kind().to_string(), "Rect");
    }
}
