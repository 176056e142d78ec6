//! Export configuration.
//!
//! Existing exporters in the wild disagree on three points: whether the
//! camera basis carries up/right or gaze only, which world matrix plane
//! corners go through, and whether output nests under a sibling `ASCII/`
//! directory. All three are explicit options here rather than hardcoded.

/// How much of the camera basis to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraBasisMode {
    /// Emit gaze, up, and right vectors
    #[default]
    Full,
    /// Emit the gaze vector only
    GazeOnly,
}

/// Which world matrix transforms plane corner points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaneCornerMatrix {
    /// The evaluated object's matrix, as reported with the temporary mesh
    #[default]
    Evaluated,
    /// The original entity's matrix
    Original,
}

/// Caller-facing knobs for one export pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportConfig {
    pub camera_basis: CameraBasisMode,
    pub plane_corners: PlaneCornerMatrix,

    /// Nest the output file under an `ASCII/` directory that is a sibling
    /// of the project directory. Only affects the project-dir branch of
    /// path resolution; the temp-dir fallback stays flat.
    pub ascii_subdir: bool,
}
