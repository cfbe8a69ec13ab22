//! Procedural ribbon trails following a set of moving anchors, like the edges of a blade.
//!
//! Every rail of the ribbon follows one anchor. A rolling history of the anchor positions is kept
//! as a vertex grid, recorded at its own cadence and smoothed with splines between history
//! samples. Texture coordinates follow the real arc length of each rail, so the texture
//! neither stretches nor compresses when the anchors speed up.

mod anchor;
mod grid;
mod manager;
pub mod spline;
pub mod topology;
mod uv;

pub use anchor::Anchor;
pub use grid::TrailGrid;
pub use manager::TrailManager;
pub use uv::recompute_uvs;
