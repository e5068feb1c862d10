//! sf-core: stable foundation for stepflow.
//!
//! Contains:
//! - ids (stable compact IDs for graph objects)
//! - geom (integer 2D geometry: points, rects, connector clipping)

pub mod geom;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use geom::*;
pub use ids::*;
