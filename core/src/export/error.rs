//! Error and warning types for mesh export.
//!
//! The pipeline distinguishes hard failures from degraded-but-usable
//! output. Only cancellation aborts an export; geometry problems are
//! reported as [`ExportWarning`]s, logged, collected into the payload,
//! and the offending mesh is still emitted.

use thiserror::Error;

/// Fatal export outcomes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// Cooperative cancellation was observed mid-pipeline. No partial
    /// payload is valid; the caller discards any in-progress buffers.
    #[error("export cancelled")]
    Cancelled,
}

/// Non-fatal problems found while exporting one mesh.
///
/// Warnings never stop the pipeline; oversized buffers are still
/// produced so a batch export can finish and report loudly afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// The mesh has zero faces.
    EmptyMesh,
    /// The mesh has fewer than 3 vertices.
    InsufficientVertices {
        /// Source vertex count.
        count: usize,
    },
    /// The vertex count is at or beyond the 16-bit index ceiling.
    VertexCeilingExceeded {
        /// Offending vertex count.
        count: usize,
        /// False when the raw source count already exceeded the ceiling,
        /// true when the welded output buffer did.
        after_weld: bool,
        /// Set when enabling vertex optimization might have helped.
        hint_optimize: bool,
    },
}

impl std::fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh has no faces"),
            Self::InsufficientVertices { count } => {
                write!(f, "mesh has not enough vertices ({count})")
            }
            Self::VertexCeilingExceeded {
                count,
                after_weld,
                hint_optimize,
            } => {
                let stage = if *after_weld { "welded" } else { "source" };
                write!(f, "{stage} vertex count {count} exceeds the 65535 limit")?;
                if *hint_optimize {
                    write!(f, " (enabling vertex optimization may reduce it)")?;
                }
                Ok(())
            }
        }
    }
}
