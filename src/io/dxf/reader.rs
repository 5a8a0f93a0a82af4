//! DXF polyline reader

mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, PointReader};
pub use text_reader::DxfTextReader;

use super::{DxfCode, LayerFilter};
use crate::entities::Polyline;
use crate::error::Result;
use crate::io::PolylineReader;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::Vertex;
use bitflags::bitflags;
use encoding_rs::Encoding;
use indexmap::IndexSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Section holding the model-space entities
const ENTITIES_SECTION: &str = "ENTITIES";

/// Layer assumed for entities without a code 8 pair
const DEFAULT_LAYER: &str = "0";

/// Top-level entity keywords, in `EntityKind` order
const ENTITY_KEYWORDS: [&str; 4] = ["POLYLINE", "POINT", "LINE", "CIRCLE"];

/// Keywords inside a POLYLINE sequence
const SEQUENCE_KEYWORDS: [&str; 2] = ["VERTEX", "SEQEND"];

bitflags! {
    /// POLYLINE flags (DXF group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PolylineFlags: u16 {
        const CLOSED = 1;
        const CURVE_FIT = 2;
        const SPLINE_FIT = 4;
        const POLYLINE_3D = 8;
        const POLYGON_MESH = 16;
        const CLOSED_N = 32;
        const POLYFACE_MESH = 64;
        const LINETYPE_CONTINUOUS = 128;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Polyline,
    Point,
    Line,
    Circle,
}

impl EntityKind {
    fn from_index(index: usize) -> Self {
        match index {
            0 => EntityKind::Polyline,
            1 => EntityKind::Point,
            2 => EntityKind::Line,
            _ => EntityKind::Circle,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            EntityKind::Polyline => ENTITY_KEYWORDS[0],
            EntityKind::Point => ENTITY_KEYWORDS[1],
            EntityKind::Line => ENTITY_KEYWORDS[2],
            EntityKind::Circle => ENTITY_KEYWORDS[3],
        }
    }
}

/// Where the reader is between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing read yet; the ENTITIES skip may still be pending
    Start,
    /// Looking for the next entity keyword
    Entities,
    /// Stream exhausted or closed
    Finished,
}

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// Read entities from block definitions too. When `false` the reader
    /// first skips forward to the ENTITIES section.
    ///
    /// Default: `true`.
    pub include_blocks: bool,

    /// Number each record's `reference` by the discovery order of its layer.
    /// When `false` every reference is 0.
    ///
    /// Default: `false`.
    pub reference_from_layer: bool,

    /// Which layers are read. Default: all.
    pub layer_filter: LayerFilter,

    /// Fallback encoding for lines that are not valid UTF-8.
    /// `None` decodes them as Latin-1.
    pub encoding: Option<&'static Encoding>,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            include_blocks: true,
            reference_from_layer: false,
            layer_filter: LayerFilter::All,
            encoding: None,
        }
    }
}

/// Streams POLYLINE, POINT, LINE and CIRCLE entities out of an ASCII DXF
/// file as [`Polyline`] records.
///
/// - POLYLINE keeps its vertices and closed flag (closed unless a code 70
///   says otherwise before the first VERTEX).
/// - POINT yields one vertex, LINE two.
/// - CIRCLE yields its centre, with the radius in `dose`.
pub struct DxfPolylineReader<R: BufRead> {
    reader: Option<DxfTextReader<R>>,
    config: DxfReaderConfiguration,
    state: ScanState,
    layers: IndexSet<String>,
    notifications: NotificationCollection,
}

impl DxfPolylineReader<BufReader<File>> {
    /// Open a DXF file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> DxfPolylineReader<R> {
    /// Create a reader over any buffered source
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Some(DxfTextReader::new(reader)),
            config: DxfReaderConfiguration::default(),
            state: ScanState::Start,
            layers: IndexSet::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        if let Some(reader) = self.reader.as_mut() {
            reader.set_encoding(config.encoding);
        }
        self.config = config;
        self
    }

    pub fn configuration(&self) -> &DxfReaderConfiguration {
        &self.config
    }

    /// Distinct layers of the emitted records, in first-seen order. A
    /// record's reference is its layer's index here when
    /// `reference_from_layer` is on.
    pub fn layers(&self) -> &IndexSet<String> {
        &self.layers
    }

    fn next_pair(&mut self) -> Result<Option<DxfCodePair>> {
        match self.reader.as_mut() {
            Some(reader) => reader.read_pair(),
            None => Ok(None),
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        if let Some(reader) = self.reader.as_mut() {
            reader.push_back(pair);
        }
    }

    fn find_keyword(&mut self, candidates: &[&str]) -> Result<Option<usize>> {
        match self.reader.as_mut() {
            Some(reader) => reader.find_keyword(candidates),
            None => Ok(None),
        }
    }

    fn line_number(&self) -> usize {
        self.reader.as_ref().map_or(0, DxfTextReader::line_number)
    }

    /// Apply the layer filter, recording a rejection
    fn accept_layer(&mut self, layer: &str, kind: EntityKind) -> bool {
        if self.config.layer_filter.matches(layer) {
            return true;
        }
        tracing::trace!("{} on layer '{}' rejected", kind.keyword(), layer);
        self.notifications.notify(
            NotificationType::Rejected,
            format!(
                "{} on layer '{}' near line {} skipped",
                kind.keyword(),
                layer,
                self.line_number()
            ),
        );
        false
    }

    /// Record that the stream ended inside an entity
    fn truncated(&mut self, kind: EntityKind) -> Option<Polyline> {
        tracing::warn!("DXF stream ends inside {} entity", kind.keyword());
        self.notifications.notify(
            NotificationType::Truncated,
            format!("stream ends inside {} entity; record dropped", kind.keyword()),
        );
        self.state = ScanState::Finished;
        None
    }

    /// Register the layer and stamp the reference
    fn finish(&mut self, mut polyline: Polyline, layer: String) -> Polyline {
        let (index, _) = self.layers.insert_full(layer);
        polyline.reference = if self.config.reference_from_layer {
            index
        } else {
            0
        };
        tracing::debug!(
            "emitting polyline: {} vertices, closed={}, reference={}",
            polyline.len(),
            polyline.closed,
            polyline.reference
        );
        polyline
    }

    fn read_entity(&mut self, kind: EntityKind) -> Result<Option<Polyline>> {
        match kind {
            EntityKind::Polyline => self.read_polyline_entity(),
            _ => self.read_primitive(kind),
        }
    }

    /// Read a POLYLINE header, its VERTEX records and the closing SEQEND
    fn read_polyline_entity(&mut self) -> Result<Option<Polyline>> {
        let mut layer: Option<String> = None;
        let mut closed: Option<bool> = None;

        while layer.is_none() || closed.is_none() {
            let pair = match self.next_pair()? {
                Some(pair) => pair,
                None => return Ok(self.truncated(EntityKind::Polyline)),
            };

            match pair.dxf_code {
                DxfCode::Start => {
                    self.push_back(pair);
                    break;
                }
                DxfCode::LayerName => layer = Some(pair.value_string),
                DxfCode::Flags => {
                    // Only a flag value of exactly 1 marks the polyline closed
                    let flags = PolylineFlags::from_bits_retain(pair.int16()? as u16);
                    closed = Some(flags == PolylineFlags::CLOSED);
                    if flags.contains(PolylineFlags::CLOSED) && flags != PolylineFlags::CLOSED {
                        self.notifications.notify(
                            NotificationType::Warning,
                            format!(
                                "POLYLINE flags {:?} at line {} read as open",
                                flags, pair.line
                            ),
                        );
                    }
                }
                _ => {}
            }
        }

        let layer = layer.unwrap_or_else(|| DEFAULT_LAYER.to_string());
        if !self.accept_layer(&layer, EntityKind::Polyline) {
            return Ok(None);
        }

        let mut polyline = Polyline::new();
        polyline.closed = closed.unwrap_or(true);

        loop {
            match self.find_keyword(&SEQUENCE_KEYWORDS)? {
                Some(0) => {
                    if let Some(vertex) = self.read_vertex()? {
                        polyline.push(vertex);
                    } else if self.state == ScanState::Finished {
                        return Ok(None);
                    }
                }
                Some(_) => break,
                None => return Ok(self.truncated(EntityKind::Polyline)),
            }
        }

        if polyline.is_empty() {
            self.notifications.notify(
                NotificationType::Warning,
                format!("POLYLINE on layer '{}' has no vertices; skipped", layer),
            );
            return Ok(None);
        }

        Ok(Some(self.finish(polyline, layer)))
    }

    /// Read the coordinates of one VERTEX
    fn read_vertex(&mut self) -> Result<Option<Vertex>> {
        let mut location = PointReader::first();

        while !location.is_complete() {
            let pair = match self.next_pair()? {
                Some(pair) => pair,
                None => {
                    self.truncated(EntityKind::Polyline);
                    return Ok(None);
                }
            };
            if pair.is_start() {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("VERTEX before line {} lacks coordinates; skipped", pair.line),
                );
                self.push_back(pair);
                return Ok(None);
            }
            location.add_coordinate(&pair)?;
        }

        Ok(location.get_point())
    }

    /// Read a POINT, LINE or CIRCLE up to the next code 0
    fn read_primitive(&mut self, kind: EntityKind) -> Result<Option<Polyline>> {
        let mut layer: Option<String> = None;
        let mut first = PointReader::first();
        let mut second = PointReader::second();
        let mut radius: Option<f64> = None;

        loop {
            let pair = match self.next_pair()? {
                Some(pair) => pair,
                None => return Ok(self.truncated(kind)),
            };

            match pair.dxf_code {
                DxfCode::Start => {
                    // Leave the next keyword for the entity scan
                    self.push_back(pair);
                    break;
                }
                DxfCode::LayerName => {
                    if !self.accept_layer(&pair.value_string, kind) {
                        return Ok(None);
                    }
                    layer = Some(pair.value_string);
                }
                DxfCode::Radius if kind == EntityKind::Circle => radius = Some(pair.double()?),
                DxfCode::XCoordinate | DxfCode::YCoordinate => {
                    first.add_coordinate(&pair)?;
                }
                DxfCode::XCoordinate1 | DxfCode::YCoordinate1 if kind == EntityKind::Line => {
                    second.add_coordinate(&pair)?;
                }
                _ => {}
            }
        }

        let layer = match layer {
            Some(layer) => layer,
            None => {
                let layer = DEFAULT_LAYER.to_string();
                if !self.accept_layer(&layer, kind) {
                    return Ok(None);
                }
                layer
            }
        };

        let mut polyline = Polyline::new();
        polyline.push(first.point_or_origin());
        match kind {
            EntityKind::Line => polyline.push(second.point_or_origin()),
            EntityKind::Circle => polyline.dose = radius.unwrap_or(0.0),
            _ => {}
        }

        Ok(Some(self.finish(polyline, layer)))
    }

    /// Advance the scan until a record is emitted or the stream ends
    fn scan(&mut self) -> Result<Option<Polyline>> {
        loop {
            match self.state {
                ScanState::Start => {
                    self.state = ScanState::Entities;
                    if !self.config.include_blocks {
                        let found = match self.reader.as_mut() {
                            Some(reader) => reader.find_value(ENTITIES_SECTION)?,
                            None => false,
                        };
                        if !found {
                            tracing::debug!("no {} section found", ENTITIES_SECTION);
                            self.state = ScanState::Finished;
                        }
                    }
                }
                ScanState::Entities => match self.find_keyword(&ENTITY_KEYWORDS)? {
                    Some(index) => {
                        if let Some(polyline) = self.read_entity(EntityKind::from_index(index))? {
                            return Ok(Some(polyline));
                        }
                    }
                    None => self.state = ScanState::Finished,
                },
                ScanState::Finished => return Ok(None),
            }
        }
    }
}

impl<R: BufRead> PolylineReader for DxfPolylineReader<R> {
    /// A parse error ends the stream: later calls return `None`.
    fn read_polyline(&mut self) -> Result<Option<Polyline>> {
        let result = self.scan();
        if let Err(err) = &result {
            tracing::warn!("DXF reading aborted: {}", err);
            self.state = ScanState::Finished;
        }
        result
    }

    fn close(&mut self) -> Result<()> {
        if self.reader.take().is_some() {
            tracing::debug!("DXF reader closed");
        }
        self.state = ScanState::Finished;
        Ok(())
    }

    fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }
}
