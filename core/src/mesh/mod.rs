//! Host-side triangle mesh types and generators.
//!
//! This module provides the read-only mesh view the exporter consumes:
//!
//! - [`TriMesh`] - Triangulated mesh with per-face attributes
//! - [`TriFace`] - One triangle: vertex triple, material slot, smoothing mask
//! - [`UvChannel`] - A UV vertex table plus per-face UV index triples
//! - Generators for common shapes (cube, grid, sphere) used by tests
//!   and benchmarks
//!
//! The host scene owns the data these types describe; the exporter only
//! borrows it for the duration of one export call.

mod data;
pub mod generators;

pub use data::{TriFace, TriMesh, UvChannel};
