//! DXF group codes
//!
//! Group codes tag the value line that follows them. Only the codes the
//! polyline reader interprets get a named variant.

/// DXF group codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DxfCode {
    /// Entity type / sequence terminator (`POINT`, `VERTEX`, `SEQEND`, ...)
    Start,
    /// Layer name
    LayerName,
    /// First point X
    XCoordinate,
    /// Second point X
    XCoordinate1,
    /// First point Y
    YCoordinate,
    /// Second point Y
    YCoordinate1,
    /// Radius (CIRCLE)
    Radius,
    /// Integer flags (POLYLINE closed bit)
    Flags,
    /// Any code the reader does not interpret
    Other(i32),
}

impl DxfCode {
    /// Map a raw group code
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => DxfCode::Start,
            8 => DxfCode::LayerName,
            10 => DxfCode::XCoordinate,
            11 => DxfCode::XCoordinate1,
            20 => DxfCode::YCoordinate,
            21 => DxfCode::YCoordinate1,
            40 => DxfCode::Radius,
            70 => DxfCode::Flags,
            other => DxfCode::Other(other),
        }
    }

    /// The raw group code
    pub fn to_i32(self) -> i32 {
        match self {
            DxfCode::Start => 0,
            DxfCode::LayerName => 8,
            DxfCode::XCoordinate => 10,
            DxfCode::XCoordinate1 => 11,
            DxfCode::YCoordinate => 20,
            DxfCode::YCoordinate1 => 21,
            DxfCode::Radius => 40,
            DxfCode::Flags => 70,
            DxfCode::Other(code) => code,
        }
    }

    /// Coordinate axis of a point code: 0 for X, 1 for Y
    pub fn coordinate_axis(self) -> Option<usize> {
        match self {
            DxfCode::XCoordinate | DxfCode::XCoordinate1 => Some(0),
            DxfCode::YCoordinate | DxfCode::YCoordinate1 => Some(1),
            _ => None,
        }
    }

    /// Which point a coordinate code belongs to: 0 for 10/20, 1 for 11/21
    pub fn coordinate_group(self) -> Option<usize> {
        match self {
            DxfCode::XCoordinate | DxfCode::YCoordinate => Some(0),
            DxfCode::XCoordinate1 | DxfCode::YCoordinate1 => Some(1),
            _ => None,
        }
    }
}
