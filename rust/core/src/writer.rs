// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP physical file (ISO 10303-21) writer.

use crate::document::IfcDocument;
use crate::error::{Error, Result};
use crate::value::AttributeValue;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Contents of the STEP `HEADER` section
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub description: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub organization: String,
    pub preprocessor_version: String,
    pub originating_system: String,
    pub authorization: String,
    pub schema: String,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            description: "ViewDefinition [DesignTransferView]".to_string(),
            name: String::new(),
            timestamp: Utc::now(),
            author: String::new(),
            organization: String::new(),
            preprocessor_version: concat!("gis2ifc ", env!("CARGO_PKG_VERSION")).to_string(),
            originating_system: "gis2ifc".to_string(),
            authorization: "None".to_string(),
            schema: "IFC4".to_string(),
        }
    }
}

impl FileHeader {
    fn write_section(&self, out: &mut String) {
        let s = |value: &str| {
            let mut buf = String::new();
            AttributeValue::string(value).write_step(&mut buf);
            buf
        };
        out.push_str("HEADER;\n");
        out.push_str(&format!("FILE_DESCRIPTION(({}),'2;1');\n", s(&self.description)));
        out.push_str(&format!(
            "FILE_NAME({},{},({}),({}),{},{},{});\n",
            s(&self.name),
            s(&self.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
            s(&self.author),
            s(&self.organization),
            s(&self.preprocessor_version),
            s(&self.originating_system),
            s(&self.authorization),
        ));
        out.push_str(&format!("FILE_SCHEMA(({}));\n", s(&self.schema)));
        out.push_str("ENDSEC;\n");
    }
}

/// Serialize the whole document to STEP text
pub fn to_step_string(doc: &IfcDocument) -> String {
    let mut out = String::with_capacity(doc.len() * 64 + 512);
    out.push_str("ISO-10303-21;\n");
    doc.header.write_section(&mut out);
    out.push_str("DATA;\n");
    for entity in doc.entities() {
        out.push_str(&entity.id.to_string());
        out.push('=');
        out.push_str(entity.ifc_type.step_name());
        AttributeValue::List(entity.attributes.clone()).write_step(&mut out);
        out.push_str(";\n");
    }
    out.push_str("ENDSEC;\n");
    out.push_str("END-ISO-10303-21;\n");
    out
}

/// Write the document to any sink
pub fn write_step<W: Write>(doc: &IfcDocument, sink: W) -> io::Result<()> {
    let mut writer = BufWriter::new(sink);
    writer.write_all(to_step_string(doc).as_bytes())?;
    writer.flush()
}

/// Write the document to `path`, creating the parent directory if needed
pub fn save(doc: &IfcDocument, path: &Path) -> Result<()> {
    let fail = |source: io::Error| Error::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    let file = fs::File::create(path).map_err(fail)?;
    write_step(doc, file).map_err(fail)?;

    tracing::info!(path = %path.display(), entities = doc.len(), "IFC file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IfcType;
    use chrono::TimeZone;

    fn sample() -> IfcDocument {
        let header = FileHeader {
            name: "out.ifc".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ..FileHeader::default()
        };
        let mut doc = IfcDocument::new(header);
        let p = doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats([0.0, 1.5, 0.0])]);
        doc.add(IfcType::IfcPolyline, vec![AttributeValue::refs([p, p])]);
        doc
    }

    #[test]
    fn writes_header_and_data_sections() {
        let text = to_step_string(&sample());
        assert!(text.starts_with("ISO-10303-21;\nHEADER;\n"));
        assert!(text.contains("FILE_NAME('out.ifc','2024-05-01T12:00:00'"));
        assert!(text.contains("FILE_SCHEMA(('IFC4'));"));
        assert!(text.contains("#1=IFCCARTESIANPOINT((0.,1.5,0.));\n"));
        assert!(text.contains("#2=IFCPOLYLINE((#1,#1));\n"));
        assert!(text.ends_with("ENDSEC;\nEND-ISO-10303-21;\n"));
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("model.ifc");
        save(&sample(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("IFCPOLYLINE"));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let err = save(&sample(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::OutputWriteFailure { .. }));
    }
}
