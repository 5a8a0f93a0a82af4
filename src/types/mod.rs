//! Core value types shared by the readers

mod bounds;
mod vertex;

pub use bounds::BoundingBox2D;
pub use vertex::Vertex;
