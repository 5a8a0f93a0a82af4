//! Output records of the ingestion layer

pub mod polyline;

pub use polyline::{Polyline, DOSE_UNSET};
