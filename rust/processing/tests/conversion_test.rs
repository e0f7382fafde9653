// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion of in-memory datasets

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use geo::{coord, line_string, point, polygon, MultiPolygon, Polygon, Rect};
use gis2ifc_core::{
    save, to_step_string, Dataset, Feature, FileHeader, GeoReference, IfcDocument, IfcType,
    Layer, SequentialAllocator,
};
use gis2ifc_geometry::{ElevationSpec, RepresentationKind};
use gis2ifc_processing::{Conversion, ConversionConfig, Converter, Error, ErrorPolicy};
use std::collections::HashSet;

fn square(origin: f64, size: f64) -> Polygon<f64> {
    polygon![
        (x: origin, y: origin),
        (x: origin + size, y: origin),
        (x: origin + size, y: origin + size),
        (x: origin, y: origin + size),
    ]
}

fn config(bottom: f64, top: f64) -> ConversionConfig {
    ConversionConfig {
        bottom_elevation: ElevationSpec::Literal(bottom),
        top_elevation: ElevationSpec::Literal(top),
        ..ConversionConfig::default()
    }
}

fn fixed_header() -> FileHeader {
    FileHeader {
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ..FileHeader::default()
    }
}

fn run(dataset: &Dataset, config: ConversionConfig) -> Conversion {
    Converter::with_allocator(config, Box::new(SequentialAllocator::default()))
        .with_header(fixed_header())
        .run(dataset)
        .unwrap()
}

fn single_layer(name: &str, features: Vec<Feature>) -> Dataset {
    Dataset::new(vec![Layer::new(name, features)])
}

#[test]
fn polygon_becomes_extruded_proxy() {
    let dataset = single_layer(
        "buildings",
        vec![Feature::new(1, square(0.0, 10.0)).with_attribute("usage", "office")],
    );
    let conversion = run(&dataset, config(0.0, 5.0));
    assert!(conversion.report.is_success());
    assert_eq!(conversion.report.elements, 1);

    let doc = &conversion.document;
    assert_eq!(doc.count(IfcType::IfcBuildingElementProxy), 1);
    let element = doc.by_type(IfcType::IfcBuildingElementProxy).next().unwrap();
    assert_eq!(element.get_string(2), Some("GIS2BIM Layer buildings, Feature ID 1"));

    assert_eq!(doc.count(IfcType::IfcExtrudedAreaSolid), 1);
    let solid = doc.by_type(IfcType::IfcExtrudedAreaSolid).next().unwrap();
    assert_relative_eq!(solid.get_float(3).unwrap(), 5.0);

    let area = doc.by_type(IfcType::IfcQuantityArea).next().unwrap();
    assert_eq!(area.get_string(0), Some("Area"));
    assert_relative_eq!(area.get_float(3).unwrap(), 100.0);

    let pset = doc.by_type(IfcType::IfcPropertySet).next().unwrap();
    assert_eq!(pset.get_string(2), Some("ePset_GIS2BIM_buildings"));
    assert_eq!(doc.count(IfcType::IfcPropertySingleValue), 1);
}

#[test]
fn element_sits_in_storey_and_space() {
    let dataset = single_layer("buildings", vec![Feature::new(1, square(0.0, 10.0))]);
    let doc = run(&dataset, config(0.0, 5.0)).document;
    let element = doc.by_type(IfcType::IfcBuildingElementProxy).next().unwrap().id;

    let storey = doc.by_type(IfcType::IfcBuildingStorey).next().unwrap();
    assert_eq!(storey.get_string(2), Some("buildings"));
    let space = doc.by_type(IfcType::IfcSpace).next().unwrap();

    let containment = doc
        .by_type(IfcType::IfcRelContainedInSpatialStructure)
        .next()
        .unwrap();
    assert_eq!(containment.get_ref(5), Some(storey.id));
    assert!(doc.referencing(element).any(|e| e.id == containment.id));

    let feature_space = doc
        .by_type(IfcType::IfcRelAggregates)
        .find(|rel| rel.get_string(2) == Some("Feature Space"))
        .unwrap();
    assert_eq!(feature_space.get_ref(4), Some(space.id));
}

#[test]
fn no_attributes_means_no_property_set() {
    let dataset = single_layer("bare", vec![Feature::new(1, square(0.0, 2.0))]);
    let doc = run(&dataset, config(0.0, 1.0)).document;
    assert_eq!(doc.count(IfcType::IfcPropertySet), 0);
    assert_eq!(doc.count(IfcType::IfcElementQuantity), 1);
}

#[test]
fn line_becomes_surface_with_one_face_per_segment() {
    let line = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0), (x: 3.0, y: 10.0)];
    let dataset = single_layer("walls", vec![Feature::new(7, line)]);
    let doc = run(&dataset, config(0.0, 3.0)).document;

    assert_eq!(doc.count(IfcType::IfcFace), 2);
    assert_eq!(doc.count(IfcType::IfcExtrudedAreaSolid), 0);
    let length = doc.by_type(IfcType::IfcQuantityLength).next().unwrap();
    assert_relative_eq!(length.get_float(3).unwrap(), 11.0);
}

#[test]
fn point_gets_vertical_axis_when_requested() {
    let mut config = config(2.0, 8.0);
    config.representations = vec![RepresentationKind::Axis];
    let dataset = single_layer("trees", vec![Feature::new(1, point!(x: 5.0, y: 5.0))]);
    let doc = run(&dataset, config).document;

    let rep = doc.by_type(IfcType::IfcShapeRepresentation).next().unwrap();
    assert_eq!(rep.get_string(1), Some("Axis"));
    assert_eq!(doc.count(IfcType::IfcPolyline), 1);
}

#[test]
fn multipolygon_gives_one_solid_per_part() {
    let parts = MultiPolygon::new(vec![square(0.0, 1.0), square(5.0, 1.0), square(10.0, 1.0)]);
    let dataset = single_layer("blocks", vec![Feature::new(1, parts)]);
    let doc = run(&dataset, config(0.0, 4.0)).document;

    assert_eq!(doc.count(IfcType::IfcExtrudedAreaSolid), 3);
    assert_eq!(doc.count(IfcType::IfcShapeRepresentation), 1);
}

#[test]
fn failing_feature_leaves_no_trace() {
    let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
    let mut config = config(0.0, 1.0);
    config.representations = vec![RepresentationKind::Body];

    let empty = run(&single_layer("misc", vec![]), config.clone()).document;
    let conversion = run(&single_layer("misc", vec![Feature::new(3, rect)]), config);

    assert_eq!(conversion.report.elements, 0);
    assert_eq!(conversion.report.failures.len(), 1);
    assert_eq!(conversion.report.failures[0].feature_id, 3);
    assert!(matches!(
        *conversion.report.failures[0].source,
        Error::Geometry(gis2ifc_geometry::Error::UnsupportedGeometry { .. })
    ));
    assert_eq!(conversion.document.len(), empty.len());
    assert_eq!(conversion.document.count(IfcType::IfcBuildingElementProxy), 0);
}

#[test]
fn continue_policy_keeps_good_features() {
    let bad = Feature::new(2, square(0.0, 1.0)).with_attribute("height", "tall");
    let mut config = config(0.0, 1.0);
    config.top_elevation = ElevationSpec::attribute("height");

    let dataset = single_layer(
        "mixed",
        vec![
            Feature::new(1, square(0.0, 1.0)).with_attribute("height", 3.0),
            bad,
            Feature::new(3, square(5.0, 1.0)).with_attribute("height", 6.0),
        ],
    );
    let conversion = run(&dataset, config);
    assert_eq!(conversion.report.features, 3);
    assert_eq!(conversion.report.elements, 2);
    assert_eq!(conversion.document.count(IfcType::IfcBuildingElementProxy), 2);

    let depths: Vec<f64> = conversion
        .document
        .by_type(IfcType::IfcExtrudedAreaSolid)
        .filter_map(|s| s.get_float(3))
        .collect();
    assert_eq!(depths, vec![3.0, 6.0]);

    match conversion.into_document() {
        Err(Error::FeaturesFailed(failures)) => assert_eq!(failures[0].feature_id, 2),
        other => panic!("expected collected failures, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn unused_elevation_attribute_does_not_fail_a_point() {
    let mut config = config(0.0, 1.0);
    config.bottom_elevation = ElevationSpec::attribute("BASE");
    let dataset = single_layer(
        "trees",
        vec![Feature::new(1, point!(x: 5.0, y: 5.0)).with_attribute("BASE", "n/a")],
    );

    let conversion = run(&dataset, config);
    assert!(conversion.report.is_success());
    assert_eq!(conversion.report.elements, 1);
    assert_eq!(conversion.document.count(IfcType::IfcBuildingElementProxy), 1);
    assert_eq!(conversion.document.count(IfcType::IfcShapeRepresentation), 0);
}

#[test]
fn flat_polygon_is_an_elevation_error() {
    let dataset = single_layer(
        "plots",
        vec![Feature::new(1, square(0.0, 1.0)), Feature::new(2, point!(x: 5.0, y: 5.0))],
    );
    let conversion = run(&dataset, config(3.0, 3.0));

    assert_eq!(conversion.report.elements, 1);
    assert_eq!(conversion.report.failures.len(), 1);
    assert_eq!(conversion.report.failures[0].feature_id, 1);
    assert!(matches!(
        *conversion.report.failures[0].source,
        Error::Geometry(gis2ifc_geometry::Error::InvalidElevationAttribute { .. })
    ));
    assert_eq!(conversion.document.count(IfcType::IfcExtrudedAreaSolid), 0);
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let mut config = config(5.0, 1.0);
    config.error_policy = ErrorPolicy::Abort;
    let dataset = single_layer(
        "inverted",
        vec![Feature::new(4, square(0.0, 1.0)), Feature::new(5, square(2.0, 1.0))],
    );

    let result = Converter::with_allocator(config, Box::new(SequentialAllocator::default()))
        .run(&dataset);
    match result {
        Err(Error::Feature(failure)) => {
            assert_eq!(failure.layer, "inverted");
            assert_eq!(failure.feature_id, 4);
        }
        other => panic!("expected abort, got {:?}", other.map(|c| c.report)),
    }
}

#[test]
fn layer_filter_selects_layers() {
    let dataset = Dataset::new(vec![
        Layer::new("roads", vec![Feature::new(1, square(0.0, 1.0))]),
        Layer::new("buildings", vec![Feature::new(1, square(0.0, 1.0))]),
    ]);
    let mut config = config(0.0, 1.0);
    config.layers = Some(vec!["buildings".to_string(), "rivers".to_string()]);

    let conversion = run(&dataset, config);
    assert_eq!(conversion.report.layers, 1);
    let doc = conversion.document;
    assert_eq!(doc.count(IfcType::IfcBuildingStorey), 1);
    assert_eq!(
        doc.by_type(IfcType::IfcBuildingStorey).next().unwrap().get_string(2),
        Some("buildings")
    );
}

#[test]
fn global_ids_are_unique() {
    let dataset = Dataset::new(vec![
        Layer::new(
            "a",
            vec![
                Feature::new(1, square(0.0, 1.0)).with_attribute("k", 1_i64),
                Feature::new(2, square(3.0, 1.0)).with_attribute("k", 2_i64),
            ],
        ),
        Layer::new("b", vec![Feature::new(1, square(6.0, 1.0))]),
    ]);
    let conversion = Converter::new(config(0.0, 1.0)).run(&dataset).unwrap();
    let doc = conversion.document;

    let ids: Vec<&str> = doc.entities().iter().filter_map(|e| e.global_id()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert!(ids.len() > 10);
    assert_eq!(ids.len(), unique.len());
    assert!(ids.iter().all(|id| id.len() == 22));
}

#[test]
fn sequential_ids_make_output_reproducible() {
    let dataset = single_layer(
        "buildings",
        vec![Feature::new(1, square(0.0, 10.0)).with_attribute("floors", 3_i64)],
    );
    let first = to_step_string(&run(&dataset, config(0.0, 5.0)).document);
    let second = to_step_string(&run(&dataset, config(0.0, 5.0)).document);
    assert_eq!(first, second);
}

#[test]
fn offset_writes_map_conversion() {
    let mut config = config(0.0, 1.0);
    config.transform.eastings = 2_600_000.0;
    config.transform.northings = 1_200_000.0;
    config.transform.crs_name = Some("EPSG:2056".to_string());

    let dataset = single_layer(
        "buildings",
        vec![Feature::new(1, square(2_600_000.0, 10.0))],
    );
    let doc = run(&dataset, config).document;

    let georef = GeoReference::read(&doc).unwrap();
    assert_relative_eq!(georef.eastings, 2_600_000.0);
    assert_relative_eq!(georef.northings, 1_200_000.0);
    assert_eq!(georef.crs_name.as_deref(), Some("EPSG:2056"));

    // Profile is in local coordinates
    let xs: Vec<f64> = doc
        .by_type(IfcType::IfcCartesianPoint)
        .filter_map(|p| p.get_list(0).and_then(|c| c.first()).and_then(|c| c.as_float()))
        .collect();
    assert!(xs.iter().all(|x| x.abs() < 1_000_000.0));
}

#[test]
fn identity_transform_has_no_georeference() {
    let dataset = single_layer("buildings", vec![Feature::new(1, square(0.0, 1.0))]);
    let doc = run(&dataset, config(0.0, 1.0)).document;
    assert!(GeoReference::read(&doc).is_none());
    assert_eq!(doc.count(IfcType::IfcMapConversion), 0);
}

#[test]
fn saved_file_is_a_step_file() {
    let dataset = single_layer("buildings", vec![Feature::new(1, square(0.0, 1.0))]);
    let doc: IfcDocument = run(&dataset, config(0.0, 1.0)).into_document().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ifc");
    save(&doc, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ISO-10303-21;"));
    assert!(text.trim_end().ends_with("END-ISO-10303-21;"));
    assert!(text.contains("FILE_SCHEMA(('IFC4'));"));
    assert!(text.contains("IFCBUILDINGELEMENTPROXY("));
}

#[test]
fn geojson_directory_to_ifc_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("buildings.geojson"),
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": 12,
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0, 0], [4, 0], [4, 5], [0, 5], [0, 0]]]
                    },
                    "properties": { "HEIGHT": 9.5, "name": "Hall", "listed": false }
                },
                { "type": "Feature", "geometry": null, "properties": {} }
            ]
        }"#,
    )
    .unwrap();

    let dataset = Dataset::open(dir.path()).unwrap();
    let mut config = config(0.0, 1.0);
    config.top_elevation = ElevationSpec::attribute("HEIGHT");
    let doc = run(&dataset, config).into_document().unwrap();

    let element = doc.by_type(IfcType::IfcBuildingElementProxy).next().unwrap();
    assert_eq!(element.get_string(2), Some("GIS2BIM Layer buildings, Feature ID 12"));
    let solid = doc.by_type(IfcType::IfcExtrudedAreaSolid).next().unwrap();
    assert_relative_eq!(solid.get_float(3).unwrap(), 9.5);
    assert_eq!(doc.count(IfcType::IfcPropertySingleValue), 3);

    let out = dir.path().join("nested").join("buildings.ifc");
    save(&doc, &out).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("IFCBOOLEAN(.F.)"));
    assert!(text.contains("IFCTEXT('Hall')"));
}
