//! # pattern-ingest
//!
//! Streaming readers that turn lithography input files into polylines.
//!
//! Two input formats are supported:
//!
//! - ASCII DXF drawings: `POLYLINE`, `POINT`, `LINE` and `CIRCLE` records of
//!   the `ENTITIES` section, optionally filtered by layer
//! - Stage motion-command logs: the paths a direct-write tool drew between
//!   two laser triggers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pattern_ingest::{DxfPolylineReader, PolylineReader};
//!
//! let mut reader = DxfPolylineReader::from_file("structure.dxf")?;
//! while let Some(polyline) = reader.read_polyline()? {
//!     println!("{} vertices, reference {}", polyline.len(), polyline.reference);
//! }
//! reader.close()?;
//! # Ok::<(), pattern_ingest::IngestError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`PolylineReader`] - pull-based reader contract shared by every format
//! - [`Polyline`] - ordered vertices plus closed flag, dose and reference
//! - [`Pattern`] - the collection a whole file is read into
//! - [`NotificationCollection`] - non-fatal events a reader recorded

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod pattern;
pub mod types;

// Re-export commonly used types
pub use error::{IngestError, Result};
pub use types::{BoundingBox2D, Vertex};

pub use entities::{Polyline, DOSE_UNSET};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use pattern::Pattern;

// Re-export I/O types
pub use io::{
    open_reader, DxfPolylineReader, DxfReaderConfiguration, InputFormat, LayerFilter,
    MotionLogConfiguration, MotionLogReader, PolylineReader, ReaderOptions, RegexDialect,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
