//! Geographic plumbing: the fixed Aitoff projection, TopoJSON
//! decoding, and polygon helpers.

pub mod geometry;
pub mod projection;
pub mod topo;

pub use projection::Projection;
