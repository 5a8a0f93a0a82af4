//! Bounding box over polyline vertices

use super::Vertex;
use std::fmt;

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Minimum point (lower-left corner)
    pub min: Vertex,
    /// Maximum point (upper-right corner)
    pub max: Vertex,
}

impl BoundingBox2D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vertex, max: Vertex) -> Self {
        BoundingBox2D { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Vertex) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box that contains all given points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let mut iter = points.into_iter();
        let mut bounds = BoundingBox2D::from_point(*iter.next()?);
        for point in iter {
            bounds.expand_to_include(*point);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vertex) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vertex) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D {
            min: Vertex::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vertex::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [
            Vertex::new(1.0, 5.0),
            Vertex::new(-2.0, 3.0),
            Vertex::new(4.0, -1.0),
        ];
        let bb = BoundingBox2D::from_points(&pts).unwrap();
        assert_eq!(bb.min, Vertex::new(-2.0, -1.0));
        assert_eq!(bb.max, Vertex::new(4.0, 5.0));
        assert_eq!(bb.width(), 6.0);
        assert_eq!(bb.height(), 6.0);
        assert_eq!(bb.center(), Vertex::new(1.0, 2.0));
    }

    #[test]
    fn test_from_no_points() {
        let pts: [Vertex; 0] = [];
        assert!(BoundingBox2D::from_points(&pts).is_none());
    }

    #[test]
    fn test_merge_and_contains() {
        let a = BoundingBox2D::new(Vertex::new(0.0, 0.0), Vertex::new(1.0, 1.0));
        let b = BoundingBox2D::new(Vertex::new(2.0, -1.0), Vertex::new(3.0, 0.5));
        let m = a.merge(&b);
        assert_eq!(m.min, Vertex::new(0.0, -1.0));
        assert_eq!(m.max, Vertex::new(3.0, 1.0));
        assert!(m.contains(Vertex::new(2.5, 0.0)));
        assert!(!a.contains(Vertex::new(2.5, 0.0)));
    }
}
