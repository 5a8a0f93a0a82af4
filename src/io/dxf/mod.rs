//! DXF (Drawing Exchange Format) ingestion

mod dxf_code;
mod layer_filter;
mod reader;

pub use dxf_code::DxfCode;
pub use layer_filter::{LayerFilter, RegexDialect};
pub use reader::{DxfCodePair, DxfPolylineReader, DxfReaderConfiguration, PolylineFlags};
