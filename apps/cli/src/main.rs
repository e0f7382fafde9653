// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gis2ifc - convert GIS vector layers into an IFC4 model.
//!
//! ```text
//! gis2ifc [OPTIONS] <DST_IFC_FILE> <SRC_GIS_FILE> [LAYERNAME]...
//! ```
//!
//! Every feature of every selected layer becomes one element. Polygons are
//! extruded between the bottom and top elevation, lines become vertical
//! surfaces and points vertical axes.

use anyhow::{Context, Result};
use clap::Parser;
use gis2ifc_core::{save, Dataset, SequentialAllocator};
use gis2ifc_geometry::{ElevationSpec, RepresentationKind};
use gis2ifc_processing::{ConversionConfig, Converter, ErrorPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gis2ifc", version, about)]
struct Args {
    /// Output IFC file
    dst: PathBuf,

    /// GeoJSON file, or a directory of GeoJSON files (one layer each)
    src: PathBuf,

    /// Layers to convert; all layers when omitted
    layers: Vec<String>,

    /// Top elevation: a number, else the name of a numeric attribute
    #[arg(long, allow_negative_numbers = true)]
    top: Option<ElevationSpec>,

    /// Bottom elevation: a number, else the name of a numeric attribute
    #[arg(long, allow_negative_numbers = true)]
    bottom: Option<ElevationSpec>,

    #[arg(long, allow_negative_numbers = true)]
    eastings: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    northings: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    orthogonal_height: Option<f64>,

    /// Rotation of the model x axis, degrees counter-clockwise from east
    #[arg(long, allow_negative_numbers = true)]
    rotation: Option<f64>,

    /// Representation to build (cog, box, axis, footprint, surface, body); repeatable
    #[arg(long = "representation", value_name = "KIND")]
    representations: Vec<RepresentationKind>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort on the first feature that fails to convert
    #[arg(long)]
    fail_fast: bool,

    /// Sequential GlobalIds for reproducible output
    #[arg(long)]
    deterministic_ids: bool,
}

impl Args {
    /// Configuration file (or defaults) with command-line values on top
    fn conversion_config(&self) -> Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => ConversionConfig::load(path)?,
            None => ConversionConfig::default(),
        };

        if !self.layers.is_empty() {
            config.layers = Some(self.layers.clone());
        }
        if let Some(top) = &self.top {
            config.top_elevation = top.clone();
        }
        if let Some(bottom) = &self.bottom {
            config.bottom_elevation = bottom.clone();
        }
        if let Some(v) = self.eastings {
            config.transform.eastings = v;
        }
        if let Some(v) = self.northings {
            config.transform.northings = v;
        }
        if let Some(v) = self.orthogonal_height {
            config.transform.orthogonal_height = v;
        }
        if let Some(v) = self.rotation {
            config.transform.rotation_degrees = v;
        }
        if !self.representations.is_empty() {
            config.representations = self.representations.clone();
        }
        if self.fail_fast {
            config.error_policy = ErrorPolicy::Abort;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.conversion_config()?;
    tracing::info!(
        src = %args.src.display(),
        dst = %args.dst.display(),
        representations = ?config.representations,
        "Starting conversion"
    );

    let dataset = Dataset::open(&args.src)
        .with_context(|| format!("Failed to read {}", args.src.display()))?;

    let mut converter = if args.deterministic_ids {
        Converter::with_allocator(config, Box::new(SequentialAllocator::default()))
    } else {
        Converter::new(config)
    };
    let conversion = converter.run(&dataset)?;

    let report = &conversion.report;
    tracing::info!(
        layers = report.layers,
        features = report.features,
        elements = report.elements,
        failed = report.failures.len(),
        "Features converted"
    );

    let mut doc = conversion.into_document()?;
    if let Some(name) = args.dst.file_name() {
        doc.header.name = name.to_string_lossy().into_owned();
    }
    save(&doc, &args.dst).with_context(|| format!("Failed to write {}", args.dst.display()))?;
    Ok(())
}
