//! CSD Core - canonical scene description extraction.
//!
//! This crate provides:
//!
//! - **Host scene model**: [`SceneEntity`], [`Transform`], render settings,
//!   and the read-only [`SceneSource`] capability trait.
//! - **Export**: classification, extraction, and JSON serialization of
//!   the renderer-agnostic scene description.
//! - **Fixture**: a synthetic in-memory host for tests and demos.
//!
//! # Example
//!
//! ```ignore
//! use csd_core::export::{export_scene, ExportConfig};
//! use csd_core::fixture::FixtureScene;
//!
//! let mut scene = FixtureScene::new("shot010");
//! // ... populate the scene ...
//! export_scene(&scene, &ExportConfig::default())?;
//! ```

pub mod export;
pub mod fixture;
pub mod scene;

// Re-export commonly used types
pub use export::{export_scene, CanonicalRecord, ExportConfig, ExportError};
pub use scene::{RenderSettings, SceneEntity, SceneSource, Transform};
