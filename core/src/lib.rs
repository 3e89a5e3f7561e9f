//! # Meshport Core
//!
//! Core crate of the meshport exporter: converts a host scene's
//! triangulated meshes into renderer-ready geometry payloads and
//! extracts transform/visibility animation curves.
//!
//! The crate is deliberately free of any file-format or GPU concerns.
//! Serialization of the produced [`export::MeshPayload`] and upload of
//! its buffers are the caller's job.

pub mod cancel;
pub mod export;
pub mod math;
pub mod mesh;
pub mod scene;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once the host has a logger installed.
pub fn init() {
    log::info!("meshport core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
