// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Schema Types
//!
//! The IFC4 entity types this converter emits. Using an enum keeps the
//! emitting code free of string typos and lets tests count entities by type.

use std::fmt;

/// IFC entity types written by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IfcType {
    // Spatial structure
    IfcProject,
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,
    IfcSpace,

    // Elements
    IfcBuildingElementProxy,
    IfcWall,
    IfcWallStandardCase,
    IfcSlab,

    // Relationships
    IfcRelAggregates,
    IfcRelContainedInSpatialStructure,
    IfcRelDefinesByProperties,

    // Properties and quantities
    IfcPropertySet,
    IfcPropertySingleValue,
    IfcElementQuantity,
    IfcQuantityArea,
    IfcQuantityLength,

    // Representation
    IfcShapeRepresentation,
    IfcProductDefinitionShape,
    IfcGeometricRepresentationContext,

    // Placement
    IfcLocalPlacement,
    IfcAxis2Placement3D,
    IfcCartesianPoint,
    IfcDirection,

    // Curves, profiles and solids
    IfcPolyline,
    IfcArbitraryClosedProfileDef,
    IfcArbitraryProfileDefWithVoids,
    IfcExtrudedAreaSolid,

    // Faces
    IfcPolyLoop,
    IfcFaceOuterBound,
    IfcFace,
    IfcConnectedFaceSet,
    IfcFaceBasedSurfaceModel,

    // Ownership and units
    IfcOwnerHistory,
    IfcPerson,
    IfcOrganization,
    IfcPersonAndOrganization,
    IfcApplication,
    IfcSIUnit,
    IfcUnitAssignment,

    // Georeferencing
    IfcMapConversion,
    IfcProjectedCRS,
}

impl IfcType {
    /// Upper-case STEP keyword, e.g. `IFCCARTESIANPOINT`
    pub fn step_name(&self) -> &'static str {
        match self {
            Self::IfcProject => "IFCPROJECT",
            Self::IfcSite => "IFCSITE",
            Self::IfcBuilding => "IFCBUILDING",
            Self::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            Self::IfcSpace => "IFCSPACE",
            Self::IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",
            Self::IfcWall => "IFCWALL",
            Self::IfcWallStandardCase => "IFCWALLSTANDARDCASE",
            Self::IfcSlab => "IFCSLAB",
            Self::IfcRelAggregates => "IFCRELAGGREGATES",
            Self::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            Self::IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
            Self::IfcPropertySet => "IFCPROPERTYSET",
            Self::IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
            Self::IfcElementQuantity => "IFCELEMENTQUANTITY",
            Self::IfcQuantityArea => "IFCQUANTITYAREA",
            Self::IfcQuantityLength => "IFCQUANTITYLENGTH",
            Self::IfcShapeRepresentation => "IFCSHAPEREPRESENTATION",
            Self::IfcProductDefinitionShape => "IFCPRODUCTDEFINITIONSHAPE",
            Self::IfcGeometricRepresentationContext => "IFCGEOMETRICREPRESENTATIONCONTEXT",
            Self::IfcLocalPlacement => "IFCLOCALPLACEMENT",
            Self::IfcAxis2Placement3D => "IFCAXIS2PLACEMENT3D",
            Self::IfcCartesianPoint => "IFCCARTESIANPOINT",
            Self::IfcDirection => "IFCDIRECTION",
            Self::IfcPolyline => "IFCPOLYLINE",
            Self::IfcArbitraryClosedProfileDef => "IFCARBITRARYCLOSEDPROFILEDEF",
            Self::IfcArbitraryProfileDefWithVoids => "IFCARBITRARYPROFILEDEFWITHVOIDS",
            Self::IfcExtrudedAreaSolid => "IFCEXTRUDEDAREASOLID",
            Self::IfcPolyLoop => "IFCPOLYLOOP",
            Self::IfcFaceOuterBound => "IFCFACEOUTERBOUND",
            Self::IfcFace => "IFCFACE",
            Self::IfcConnectedFaceSet => "IFCCONNECTEDFACESET",
            Self::IfcFaceBasedSurfaceModel => "IFCFACEBASEDSURFACEMODEL",
            Self::IfcOwnerHistory => "IFCOWNERHISTORY",
            Self::IfcPerson => "IFCPERSON",
            Self::IfcOrganization => "IFCORGANIZATION",
            Self::IfcPersonAndOrganization => "IFCPERSONANDORGANIZATION",
            Self::IfcApplication => "IFCAPPLICATION",
            Self::IfcSIUnit => "IFCSIUNIT",
            Self::IfcUnitAssignment => "IFCUNITASSIGNMENT",
            Self::IfcMapConversion => "IFCMAPCONVERSION",
            Self::IfcProjectedCRS => "IFCPROJECTEDCRS",
        }
    }

    /// Whether instances of this type are rooted (carry a GlobalId)
    pub fn is_rooted(&self) -> bool {
        matches!(
            self,
            Self::IfcProject
                | Self::IfcSite
                | Self::IfcBuilding
                | Self::IfcBuildingStorey
                | Self::IfcSpace
                | Self::IfcBuildingElementProxy
                | Self::IfcWall
                | Self::IfcWallStandardCase
                | Self::IfcSlab
                | Self::IfcRelAggregates
                | Self::IfcRelContainedInSpatialStructure
                | Self::IfcRelDefinesByProperties
                | Self::IfcPropertySet
                | Self::IfcElementQuantity
        )
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.step_name())
    }
}
