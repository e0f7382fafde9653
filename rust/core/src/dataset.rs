// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoJSON dataset reader.
//!
//! A `FeatureCollection` file is one layer. A directory is read as one layer
//! per `*.geojson` / `*.json` file, in file-name order.

use crate::error::{Error, Result};
use crate::feature::{Dataset, Feature, FeatureValue, Layer};
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    id: Option<Value>,
    geometry: Option<GeometryDoc>,
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeometryDoc {
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Vec<Vec<f64>> },
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    GeometryCollection { geometries: Vec<GeometryDoc> },
}

impl Dataset {
    /// Open a GeoJSON file or a directory of GeoJSON files
    pub fn open(path: &Path) -> Result<Dataset> {
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let layers = if path.is_dir() {
            let mut files: Vec<_> = fs::read_dir(path)
                .map_err(|source| Error::InputRead {
                    path: path.to_path_buf(),
                    source,
                })?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_geojson(p))
                .collect();
            files.sort();
            files
                .iter()
                .map(|file| read_layer(file))
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![read_layer(path)?]
        };

        tracing::debug!(
            path = %path.display(),
            layers = layers.len(),
            "Dataset opened"
        );
        Ok(Dataset::new(layers))
    }
}

fn is_geojson(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("geojson") | Some("json")
    )
}

/// Read one GeoJSON file as a layer
pub fn read_layer(path: &Path) -> Result<Layer> {
    let text = fs::read_to_string(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layer")
        .to_string();
    parse_layer(&text, &stem).map_err(|message| Error::invalid_dataset(path, message))
}

/// Parse GeoJSON text; `default_name` is used when the collection has no `name`
pub fn layer_from_geojson(text: &str, default_name: &str) -> Result<Layer> {
    parse_layer(text, default_name).map_err(|message| Error::invalid_dataset(default_name, message))
}

fn parse_layer(text: &str, default_name: &str) -> std::result::Result<Layer, String> {
    let doc: CollectionDoc = serde_json::from_str(text).map_err(|e| e.to_string())?;
    if doc.kind != "FeatureCollection" {
        return Err(format!("expected a FeatureCollection, found {}", doc.kind));
    }

    let name = doc.name.unwrap_or_else(|| default_name.to_string());
    let mut features = Vec::with_capacity(doc.features.len());
    for (position, feature) in doc.features.into_iter().enumerate() {
        let id = feature
            .id
            .as_ref()
            .and_then(Value::as_i64)
            .unwrap_or(position as i64);

        let Some(geometry) = feature.geometry else {
            tracing::warn!(layer = %name, feature_id = id, "Feature without geometry skipped");
            continue;
        };
        let geometry = convert_geometry(geometry).map_err(|e| format!("feature {}: {}", id, e))?;

        let attributes = feature
            .properties
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, convert_value(value)))
            .collect();

        features.push(Feature {
            id,
            geometry,
            attributes,
        });
    }

    Ok(Layer::new(name, features))
}

/// JSON value to the tagged attribute variant
fn convert_value(value: Value) -> FeatureValue {
    match value {
        Value::Null => FeatureValue::Null,
        Value::Bool(b) => FeatureValue::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FeatureValue::Integer(i),
            None => FeatureValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => FeatureValue::Text(s),
        other => FeatureValue::Text(other.to_string()),
    }
}

fn coord(position: &[f64]) -> std::result::Result<Coord<f64>, String> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(format!("position needs at least 2 ordinates, got {}", position.len())),
    }
}

fn line(positions: &[Vec<f64>]) -> std::result::Result<LineString<f64>, String> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> std::result::Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings.next().ok_or("polygon without rings")??;
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn convert_geometry(doc: GeometryDoc) -> std::result::Result<Geometry<f64>, String> {
    Ok(match doc {
        GeometryDoc::Point { coordinates } => Point::from(coord(&coordinates)?).into(),
        GeometryDoc::MultiPoint { coordinates } => MultiPoint::new(
            coordinates
                .iter()
                .map(|p| coord(p).map(Point::from))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        )
        .into(),
        GeometryDoc::LineString { coordinates } => line(&coordinates)?.into(),
        GeometryDoc::MultiLineString { coordinates } => MultiLineString::new(
            coordinates
                .iter()
                .map(|l| line(l))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        )
        .into(),
        GeometryDoc::Polygon { coordinates } => polygon(&coordinates)?.into(),
        GeometryDoc::MultiPolygon { coordinates } => MultiPolygon::new(
            coordinates
                .iter()
                .map(|p| polygon(p))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        )
        .into(),
        GeometryDoc::GeometryCollection { geometries } => Geometry::GeometryCollection(
            geometries
                .into_iter()
                .map(convert_geometry)
                .collect::<std::result::Result<Vec<_>, _>>()?
                .into(),
        ),
    })
}
