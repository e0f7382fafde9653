// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion pipeline: hierarchy once, then every feature of every
//! selected layer, in order.

use crate::composer::{ElementComposer, OutputState};
use crate::config::{ConversionConfig, ErrorPolicy};
use crate::error::{Error, FeatureFailure, Result};
use crate::hierarchy::SpatialHierarchy;
use gis2ifc_core::{
    Dataset, FileHeader, IdAllocator, IfcDocument, PlacementArena, UuidAllocator,
};
use gis2ifc_geometry::{ElevationRange, ShapeBuilder};
use rustc_hash::FxHashSet;

/// Counts and failures of one run
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub layers: usize,
    pub features: usize,
    pub elements: usize,
    pub failures: Vec<FeatureFailure>,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output document plus what happened while building it
#[derive(Debug)]
pub struct Conversion {
    pub document: IfcDocument,
    pub report: ConversionReport,
}

impl Conversion {
    /// The document, or every collected failure
    pub fn into_document(self) -> Result<IfcDocument> {
        if self.report.failures.is_empty() {
            Ok(self.document)
        } else {
            Err(Error::FeaturesFailed(self.report.failures))
        }
    }
}

pub struct Converter {
    config: ConversionConfig,
    ids: Box<dyn IdAllocator>,
    header: FileHeader,
}

impl Converter {
    /// Converter with random GlobalIds
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_allocator(config, Box::new(UuidAllocator::new()))
    }

    pub fn with_allocator(config: ConversionConfig, ids: Box<dyn IdAllocator>) -> Self {
        let header = FileHeader {
            author: config.project.author.clone(),
            organization: config.project.organization.clone(),
            ..FileHeader::default()
        };
        Self { config, ids, header }
    }

    /// Replace the STEP header; its timestamp also dates the owner history
    pub fn with_header(mut self, header: FileHeader) -> Self {
        self.header = header;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert every selected layer of `dataset` into one document.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failing feature ends the run
    /// with [`Error::Feature`]. Under [`ErrorPolicy::Continue`] failures are
    /// logged and collected in the report.
    pub fn run(&mut self, dataset: &Dataset) -> Result<Conversion> {
        let config = &self.config;
        let transform = config.transform.build();

        let mut doc = IfcDocument::new(self.header.clone());
        let mut placements = PlacementArena::new();

        let georef = (!transform.is_identity())
            .then(|| transform.georeference(config.transform.crs_name.clone()));
        let hierarchy = SpatialHierarchy::build(
            &mut doc,
            self.ids.as_mut(),
            &mut placements,
            &config.project,
            georef.as_ref(),
        )?;

        let composer = ElementComposer {
            hierarchy: &hierarchy,
            builder: ShapeBuilder::new(&transform, config.flags()),
            bottom: &config.bottom_elevation,
            top: &config.top_elevation,
            element_class: config.element_class,
        };

        if let Some(requested) = &config.layers {
            let present: FxHashSet<&str> = dataset.layers.iter().map(|l| l.name.as_str()).collect();
            for name in requested.iter().filter(|n| !present.contains(n.as_str())) {
                tracing::warn!(layer = %name, "Requested layer not found in dataset");
            }
        }

        let mut report = ConversionReport::default();
        let mut out = OutputState {
            doc: &mut doc,
            ids: self.ids.as_mut(),
            placements: &mut placements,
        };

        for layer in dataset.layers.iter().filter(|l| config.wants_layer(&l.name)) {
            let container = hierarchy.add_layer(out.doc, out.ids, out.placements, &layer.name)?;
            let range = ElevationRange::scan(layer, &config.bottom_elevation, &config.top_elevation);
            report.layers += 1;

            tracing::info!(layer = %layer.name, features = layer.features.len(), "Converting layer");

            for feature in &layer.features {
                report.features += 1;
                match composer.compose(&mut out, &container, &range, feature) {
                    Ok(_) => report.elements += 1,
                    Err(e) => {
                        let failure = FeatureFailure::new(&layer.name, feature.id, e);
                        match config.error_policy {
                            ErrorPolicy::Abort => return Err(Error::Feature(Box::new(failure))),
                            ErrorPolicy::Continue => {
                                tracing::error!(
                                    layer = %layer.name,
                                    feature_id = feature.id,
                                    error = %failure.source,
                                    "Feature conversion failed"
                                );
                                report.failures.push(failure);
                            }
                        }
                    }
                }
            }
        }

        tracing::info!(
            layers = report.layers,
            elements = report.elements,
            failed = report.failures.len(),
            entities = doc.len(),
            "Conversion finished"
        );
        Ok(Conversion {
            document: doc,
            report,
        })
    }
}

/// Convert with random GlobalIds; fails if any feature failed
pub fn convert(dataset: &Dataset, config: ConversionConfig) -> Result<IfcDocument> {
    Converter::new(config).run(dataset)?.into_document()
}
