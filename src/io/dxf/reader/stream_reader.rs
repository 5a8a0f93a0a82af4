//! DXF code/value pairs and point accumulation

use crate::error::{IngestError, Result};
use crate::io::dxf::DxfCode;
use crate::types::Vertex;

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// The DXF code enum
    pub dxf_code: DxfCode,

    /// Trimmed value line
    pub value_string: String,

    /// Line number of the value line
    pub line: usize,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: String, line: usize) -> Self {
        Self {
            code,
            dxf_code: DxfCode::from_i32(code),
            value_string,
            line,
        }
    }

    /// Get value as string
    pub fn as_string(&self) -> &str {
        &self.value_string
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value_string.trim().parse::<f64>().ok()
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        self.value_string.trim().parse::<i16>().ok()
    }

    /// Value as double, or a parse error naming the code and line
    pub fn double(&self) -> Result<f64> {
        self.as_double().ok_or_else(|| {
            IngestError::parse(
                self.line,
                format!("invalid real value '{}' for code {}", self.value_string, self.code),
            )
        })
    }

    /// Value as i16, or a parse error naming the code and line
    pub fn int16(&self) -> Result<i16> {
        self.as_i16().ok_or_else(|| {
            IngestError::parse(
                self.line,
                format!("invalid integer value '{}' for code {}", self.value_string, self.code),
            )
        })
    }

    /// Whether this pair introduces an entity or sequence keyword
    pub fn is_start(&self) -> bool {
        self.dxf_code == DxfCode::Start
    }
}

/// Helper for reading 2D points from consecutive code pairs of one group
/// (10/20 or 11/21).
#[derive(Debug, Clone, Copy)]
pub struct PointReader {
    group: usize,
    x: Option<f64>,
    y: Option<f64>,
}

impl PointReader {
    /// Point reader for the first (10/20) coordinate group
    pub fn first() -> Self {
        Self::for_group(0)
    }

    /// Point reader for the second (11/21) coordinate group
    pub fn second() -> Self {
        Self::for_group(1)
    }

    fn for_group(group: usize) -> Self {
        Self {
            group,
            x: None,
            y: None,
        }
    }

    /// Take the coordinate if `pair` belongs to this reader's group.
    /// Returns whether it was consumed.
    pub fn add_coordinate(&mut self, pair: &DxfCodePair) -> Result<bool> {
        if pair.dxf_code.coordinate_group() != Some(self.group) {
            return Ok(false);
        }
        let value = pair.double()?;
        match pair.dxf_code.coordinate_axis() {
            Some(0) => self.x = Some(value),
            Some(1) => self.y = Some(value),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Check if we have both coordinates
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// The point, if both coordinates were seen
    pub fn get_point(&self) -> Option<Vertex> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vertex::new(x, y)),
            _ => None,
        }
    }

    /// The point with missing coordinates taken as 0
    pub fn point_or_origin(&self) -> Vertex {
        Vertex::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}
