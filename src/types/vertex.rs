//! Planar vertex type

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A point in the exposure plane.
///
/// Also used for displacements: the motion-log reader adds relative stage
/// moves to the last drawn vertex with `+`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(x: f64, y: f64) -> Self {
        Vertex { x, y }
    }

    /// The origin
    pub const ORIGIN: Vertex = Vertex::new(0.0, 0.0);

    /// Length of the vertex taken as a vector from the origin
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another vertex
    pub fn distance(&self, other: &Vertex) -> f64 {
        (*self - *other).length()
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(self, other: Vertex) -> Vertex {
        Vertex::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vertex {
    type Output = Vertex;
    fn sub(self, other: Vertex) -> Vertex {
        Vertex::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vertex {
    type Output = Vertex;
    fn mul(self, scalar: f64) -> Vertex {
        Vertex::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vertex {
    type Output = Vertex;
    fn neg(self) -> Vertex {
        Vertex::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Vertex::new(x, y)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
