//! Pattern - the ordered polyline collection a driver fills from a reader

use crate::entities::Polyline;
use crate::types::BoundingBox2D;
use indexmap::IndexSet;

/// Ordered collection of polylines.
///
/// A pattern is owned by the application; readers hand each finished
/// [`Polyline`] over by value and keep nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    polylines: Vec<Polyline>,
}

impl Pattern {
    /// Create an empty pattern
    pub fn new() -> Self {
        Pattern {
            polylines: Vec::new(),
        }
    }

    /// Append a polyline
    pub fn add_polyline(&mut self, polyline: Polyline) {
        self.polylines.push(polyline);
    }

    /// Number of polylines
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Get a polyline by position
    pub fn get(&self, index: usize) -> Option<&Polyline> {
        self.polylines.get(index)
    }

    /// Iterate over all polylines in insertion order
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.polylines.iter()
    }

    /// Iterate mutably over all polylines
    pub fn polylines_mut(&mut self) -> impl Iterator<Item = &mut Polyline> {
        self.polylines.iter_mut()
    }

    /// Polylines carrying the given reference tag
    pub fn with_reference(&self, reference: usize) -> impl Iterator<Item = &Polyline> {
        self.polylines.iter().filter(move |p| p.reference == reference)
    }

    /// Distinct reference tags in first-seen order
    pub fn references(&self) -> Vec<usize> {
        self.polylines
            .iter()
            .map(|p| p.reference)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of vertices over all polylines
    pub fn vertex_count(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }

    /// Bounding box over every vertex in the pattern
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        self.polylines
            .iter()
            .filter_map(Polyline::bounds)
            .reduce(|a, b| a.merge(&b))
    }

    /// Consume the pattern into its polylines
    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }
}

impl Extend<Polyline> for Pattern {
    fn extend<T: IntoIterator<Item = Polyline>>(&mut self, iter: T) {
        self.polylines.extend(iter);
    }
}

impl FromIterator<Polyline> for Pattern {
    fn from_iter<T: IntoIterator<Item = Polyline>>(iter: T) -> Self {
        Pattern {
            polylines: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Pattern {
    type Item = Polyline;
    type IntoIter = std::vec::IntoIter<Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Polyline;
    type IntoIter = std::slice::Iter<'a, Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.iter()
    }
}
