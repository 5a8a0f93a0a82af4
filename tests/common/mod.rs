//! Shared test utilities for pattern-ingest integration tests.
//!
//! Builders for small DXF and motion-log inputs plus read helpers, imported
//! by every test crate via `mod common;`.

#![allow(dead_code)]

use pattern_ingest::io::{DxfReaderConfiguration, MotionLogConfiguration};
use pattern_ingest::{DxfPolylineReader, MotionLogReader, Pattern, Polyline, PolylineReader};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

// ===========================================================================
// DXF builders
// ===========================================================================

/// Builds the text of an ASCII DXF file one group pair at a time.
#[derive(Debug, Default, Clone)]
pub struct DxfBuilder {
    text: String,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one code/value pair
    pub fn pair(mut self, code: i32, value: impl std::fmt::Display) -> Self {
        self.text.push_str(&format!("{:>3}\n{}\n", code, value));
        self
    }

    pub fn begin_section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    /// A POLYLINE with its VERTEX records and SEQEND
    pub fn polyline(self, layer: &str, closed: bool, vertices: &[(f64, f64)]) -> Self {
        let mut b = self
            .pair(0, "POLYLINE")
            .pair(8, layer)
            .pair(66, 1)
            .pair(70, if closed { 1 } else { 0 });
        for &(x, y) in vertices {
            b = b
                .pair(0, "VERTEX")
                .pair(8, layer)
                .pair(10, x)
                .pair(20, y)
                .pair(30, 0.0);
        }
        b.pair(0, "SEQEND")
    }

    pub fn point(self, layer: &str, x: f64, y: f64) -> Self {
        self.pair(0, "POINT").pair(8, layer).pair(10, x).pair(20, y)
    }

    pub fn line(self, layer: &str, from: (f64, f64), to: (f64, f64)) -> Self {
        self.pair(0, "LINE")
            .pair(8, layer)
            .pair(10, from.0)
            .pair(20, from.1)
            .pair(11, to.0)
            .pair(21, to.1)
    }

    pub fn circle(self, layer: &str, center: (f64, f64), radius: f64) -> Self {
        self.pair(0, "CIRCLE")
            .pair(8, layer)
            .pair(10, center.0)
            .pair(20, center.1)
            .pair(40, radius)
    }

    /// Close the file with an EOF marker
    pub fn eof(self) -> Self {
        self.pair(0, "EOF")
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// A complete DXF file whose ENTITIES section holds `entities`.
pub fn dxf_document(entities: impl FnOnce(DxfBuilder) -> DxfBuilder) -> String {
    let b = DxfBuilder::new()
        .begin_section("HEADER")
        .pair(9, "$ACADVER")
        .pair(1, "AC1009")
        .end_section()
        .begin_section("ENTITIES");
    entities(b).end_section().eof().build()
}

// ===========================================================================
// Read helpers
// ===========================================================================

pub fn dxf_reader(
    text: &str,
    config: DxfReaderConfiguration,
) -> DxfPolylineReader<Cursor<Vec<u8>>> {
    DxfPolylineReader::from_reader(Cursor::new(text.as_bytes().to_vec())).with_configuration(config)
}

pub fn motion_reader(
    text: &str,
    include_construction_lines: bool,
) -> MotionLogReader<Cursor<Vec<u8>>> {
    MotionLogReader::from_reader(Cursor::new(text.as_bytes().to_vec())).with_configuration(
        MotionLogConfiguration {
            include_construction_lines,
        },
    )
}

/// Read a whole DXF text, panicking on error.
pub fn read_dxf(text: &str, config: DxfReaderConfiguration) -> Pattern {
    dxf_reader(text, config)
        .read_pattern()
        .unwrap_or_else(|e| panic!("Failed to read DXF: {e:?}"))
}

/// Read a whole motion log, panicking on error.
pub fn read_motion_log(text: &str, include_construction_lines: bool) -> Pattern {
    motion_reader(text, include_construction_lines)
        .read_pattern()
        .unwrap_or_else(|e| panic!("Failed to read motion log: {e:?}"))
}

/// Write `text` into a temporary file with the given extension.
pub fn temp_input(text: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .expect("create temp file");
    file.write_all(text.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

// ===========================================================================
// Polyline utilities
// ===========================================================================

/// Vertex coordinates as plain tuples
pub fn coords(polyline: &Polyline) -> Vec<(f64, f64)> {
    polyline.vertices.iter().map(|v| (v.x, v.y)).collect()
}

/// References of every polyline in reading order
pub fn references(pattern: &Pattern) -> Vec<usize> {
    pattern.polylines().map(|p| p.reference).collect()
}
