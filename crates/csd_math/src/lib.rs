// Re-export glam for convenience
pub use glam::*;

// CSD math types
mod basis;
pub use basis::{camera_basis, world_direction, CameraBasis};
