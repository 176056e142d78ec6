//! Canonical scene export for CSD.
//!
//! This module turns a host scene graph into the canonical JSON document
//! consumed by the offline ray tracer:
//!
//! - **Classification**: map each entity to camera / point light /
//!   sphere / cube / plane, or skip it ([`classify`])
//! - **Extraction**: build one renderer-agnostic record per classified
//!   entity ([`Extractor`])
//! - **Serialization**: collect records in enumeration order and write
//!   them as pretty-printed JSON with a path fallback ([`export_scene`])
//!
//! ## Not supported
//!
//! - Arbitrary mesh topology (only name-recognized primitives)
//! - Non-point lights
//! - Animation / time samples; one static snapshot per invocation

use std::path::PathBuf;

use thiserror::Error;

use crate::scene::GeometryError;

mod classify;
mod config;
mod extract;
mod record;
mod writer;

pub use classify::{classify, ShapeClass};
pub use config::{CameraBasisMode, ExportConfig, PlaneCornerMatrix};
pub use extract::Extractor;
pub use record::{
    CameraPayload, CanonicalRecord, CubePayload, LightPayload, PlanePayload, RecordType,
    SpherePayload,
};
pub use writer::{build_document, export_scene, output_candidates};

/// Errors that can abort an export pass.
///
/// There is no retryable class here: every failure surfaces immediately
/// and the pass writes nothing.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("no writable output directory (tried {preferred:?}, then {fallback:?})")]
    UnwritablePath {
        preferred: Option<PathBuf>,
        fallback: PathBuf,
    },

    #[error("degenerate transform on '{entity}': rotation submatrix is singular")]
    DegenerateTransform { entity: String },

    #[error("malformed plane mesh on '{entity}': {vertex_count} vertices, need at least 4")]
    MalformedPlaneMesh { entity: String, vertex_count: usize },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
