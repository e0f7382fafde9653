// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion configuration, loaded from TOML.

use crate::error::{Error, Result};
use gis2ifc_core::IfcType;
use gis2ifc_geometry::{
    CoordinateTransform, ElevationRange, ElevationSpec, RepresentationFlags, RepresentationKind,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when a feature fails to convert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log, keep converting, fail the run at the end with every failure
    #[default]
    Continue,
    /// Stop at the first failure
    Abort,
}

/// IFC class of the element created per feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementClass {
    #[default]
    BuildingElementProxy,
    Wall,
    WallStandardCase,
    Slab,
}

impl ElementClass {
    pub fn ifc_type(&self) -> IfcType {
        match self {
            ElementClass::BuildingElementProxy => IfcType::IfcBuildingElementProxy,
            ElementClass::Wall => IfcType::IfcWall,
            ElementClass::WallStandardCase => IfcType::IfcWallStandardCase,
            ElementClass::Slab => IfcType::IfcSlab,
        }
    }
}

/// Source-to-model transform parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    pub eastings: f64,
    pub northings: f64,
    pub orthogonal_height: f64,
    pub rotation_degrees: f64,
    /// Name of the projected CRS written with the map conversion
    pub crs_name: Option<String>,
}

impl TransformConfig {
    pub fn build(&self) -> CoordinateTransform {
        CoordinateTransform::build(
            self.eastings,
            self.northings,
            self.orthogonal_height,
            self.rotation_degrees,
        )
    }
}

/// Names and ownership written into the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectInfo {
    pub name: String,
    pub site_name: String,
    pub building_name: String,
    pub author: String,
    pub organization: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "GIS2BIM".to_string(),
            site_name: "Site".to_string(),
            building_name: "GIS2BIM".to_string(),
            author: String::new(),
            organization: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    pub bottom_elevation: ElevationSpec,
    pub top_elevation: ElevationSpec,
    /// Restrict the conversion to these layers; all layers when `None`
    pub layers: Option<Vec<String>>,
    pub representations: Vec<RepresentationKind>,
    pub error_policy: ErrorPolicy,
    pub element_class: ElementClass,
    pub transform: TransformConfig,
    pub project: ProjectInfo,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            bottom_elevation: ElevationSpec::Literal(ElevationRange::DEFAULT_MIN),
            top_elevation: ElevationSpec::Literal(ElevationRange::DEFAULT_MAX),
            layers: None,
            representations: vec![RepresentationKind::Surface, RepresentationKind::Body],
            error_policy: ErrorPolicy::default(),
            element_class: ElementClass::default(),
            transform: TransformConfig::default(),
            project: ProjectInfo::default(),
        }
    }
}

impl ConversionConfig {
    /// Read a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn flags(&self) -> RepresentationFlags {
        self.representations.iter().copied().collect()
    }

    pub fn wants_layer(&self, name: &str) -> bool {
        match &self.layers {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConversionConfig::default();
        assert_eq!(config.bottom_elevation, ElevationSpec::Literal(0.0));
        assert_eq!(config.top_elevation, ElevationSpec::Literal(10000.0));
        assert_eq!(config.flags(), RepresentationFlags::default());
        assert_eq!(config.error_policy, ErrorPolicy::Continue);
        assert_eq!(config.element_class.ifc_type(), IfcType::IfcBuildingElementProxy);
        assert!(config.transform.build().is_identity());
        assert!(config.wants_layer("anything"));
    }

    #[test]
    fn parses_full_file() {
        let config = ConversionConfig::from_toml(
            r#"
            bottom_elevation = "BASE"
            top_elevation = 25
            layers = ["buildings"]
            representations = ["axis", "body"]
            error_policy = "abort"
            element_class = "slab"

            [transform]
            eastings = 2600000.0
            northings = 1200000.0
            rotation_degrees = 15.0
            crs_name = "EPSG:2056"

            [project]
            name = "City model"
            "#,
        )
        .unwrap();

        assert_eq!(config.bottom_elevation, ElevationSpec::attribute("BASE"));
        assert_eq!(config.top_elevation, ElevationSpec::Literal(25.0));
        assert!(config.wants_layer("buildings"));
        assert!(!config.wants_layer("roads"));
        assert!(config.flags().contains(RepresentationKind::Axis));
        assert!(!config.flags().contains(RepresentationKind::Surface));
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.element_class, ElementClass::Slab);
        assert_eq!(config.transform.orthogonal_height, 0.0);
        assert_eq!(config.transform.crs_name.as_deref(), Some("EPSG:2056"));
        assert_eq!(config.project.name, "City model");
        assert_eq!(config.project.site_name, "Site");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ConversionConfig::from_toml("top = 3").is_err());
        assert!(ConversionConfig::from_toml("representations = [\"mesh\"]").is_err());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gis2ifc.toml");
        std::fs::write(&path, "error_policy = \"sometimes\"").unwrap();
        match ConversionConfig::load(&path) {
            Err(Error::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a config error, got {:?}", other),
        }
    }
}
