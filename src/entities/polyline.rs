//! Polyline records produced by the readers

use crate::types::{BoundingBox2D, Vertex};

/// Value stored in [`Polyline::dose`] when no dose was assigned.
pub const DOSE_UNSET: f64 = -1.0;

/// An ordered run of vertices plus exposure metadata.
///
/// Vertex order is drawing order. A closed polyline connects its last vertex
/// back to the first one without repeating it.
///
/// `dose` carries a producer-defined scalar (a circle radius from DXF, or an
/// exposure time / speed set downstream); any value `<= 0` means unset.
/// `reference` is an opaque grouping tag: a layer index for DXF input, or the
/// exposure (0) / construction (1) marker for motion logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Vertices in drawing order
    pub vertices: Vec<Vertex>,
    /// Last vertex connects back to the first
    pub closed: bool,
    /// Producer-defined scalar, `<= 0` when unset
    pub dose: f64,
    /// Grouping / provenance tag
    pub reference: usize,
}

impl Polyline {
    /// Create an empty open polyline
    pub fn new() -> Self {
        Polyline {
            vertices: Vec::new(),
            closed: false,
            dose: DOSE_UNSET,
            reference: 0,
        }
    }

    /// Create an open polyline from existing vertices
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Polyline {
            vertices,
            ..Self::new()
        }
    }

    /// Append a vertex
    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<Vertex> {
        self.vertices.last().copied()
    }

    /// The dose, or `None` while it holds the unset sentinel
    pub fn dose(&self) -> Option<f64> {
        if self.dose > 0.0 {
            Some(self.dose)
        } else {
            None
        }
    }

    /// Mark the polyline as closed
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Path length, including the closing edge of a closed polyline
    pub fn length(&self) -> f64 {
        let open: f64 = self
            .vertices
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum();

        match (self.closed, self.vertices.first(), self.vertices.last()) {
            (true, Some(first), Some(last)) => open + last.distance(first),
            _ => open,
        }
    }

    /// Bounding box of all vertices
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.vertices)
    }

    /// Take the accumulated vertices out, leaving an empty open polyline
    /// with the unset dose and reference 0.
    pub(crate) fn take(&mut self) -> Polyline {
        std::mem::take(self)
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_creation() {
        let p = Polyline::new();
        assert!(p.is_empty());
        assert!(!p.closed);
        assert_eq!(p.reference, 0);
        assert_eq!(p.dose(), None);
    }

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut p = Polyline::new();
        p.push(Vertex::new(1.0, 1.0));
        p.push(Vertex::new(0.0, 0.0));
        p.push(Vertex::new(0.0, 0.0));
        assert_eq!(
            p.vertices,
            vec![Vertex::new(1.0, 1.0), Vertex::new(0.0, 0.0), Vertex::new(0.0, 0.0)]
        );
        assert_eq!(p.first(), Some(Vertex::new(1.0, 1.0)));
        assert_eq!(p.last(), Some(Vertex::new(0.0, 0.0)));
    }

    #[test]
    fn test_dose_sentinel() {
        let mut p = Polyline::new();
        p.dose = 0.0;
        assert_eq!(p.dose(), None);
        p.dose = 2.5;
        assert_eq!(p.dose(), Some(2.5));
    }

    #[test]
    fn test_length_open_and_closed() {
        let mut p = Polyline::from_vertices(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(3.0, 0.0),
            Vertex::new(3.0, 4.0),
        ]);
        assert!((p.length() - 7.0).abs() < 1e-12);
        p.close();
        assert!((p.length() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_two_vertex_length_counts_return_edge() {
        let mut p = Polyline::from_vertices(vec![Vertex::new(0.0, 0.0), Vertex::new(3.0, 4.0)]);
        assert!((p.length() - 5.0).abs() < 1e-12);
        p.close();
        assert!((p.length() - 10.0).abs() < 1e-12);

        let mut single = Polyline::from_vertices(vec![Vertex::new(1.0, 1.0)]);
        single.close();
        assert_eq!(single.length(), 0.0);
    }

    #[test]
    fn test_take_resets() {
        let mut p = Polyline::from_vertices(vec![Vertex::new(1.0, 2.0)]);
        p.reference = 4;
        let taken = p.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken.reference, 4);
        assert!(p.is_empty());
        assert_eq!(p.reference, 0);
    }
}
