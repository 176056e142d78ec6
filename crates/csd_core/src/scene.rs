//! Host scene graph types for CSD.
//!
//! These types describe what the core reads from the authoring tool:
//! entities with a local transform, a world matrix, and kind-specific
//! data, plus global render settings. The host side is abstracted behind
//! the read-only [`SceneSource`] trait so the exporter never depends on
//! authoring-tool internals and tests can substitute a synthetic scene.

use std::fmt;
use std::path::PathBuf;

use csd_math::{EulerRot, Mat4, Quat, Vec3};
use thiserror::Error;

/// Coarse entity kind as reported by the host scene graph.
///
/// Only `Camera`, `Light`, and `Mesh` are eligible for export; everything
/// else is filtered out before classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Camera,
    Light,
    Mesh,
    /// Locators, nulls, and other non-renderable helpers
    Empty,
    /// Any kind the host knows about but the exporter does not
    Other,
}

/// Camera lens and sensor data, authoring-tool units (millimetres).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraData {
    pub focal_length_mm: f32,
    pub sensor_width_mm: f32,
    pub sensor_height_mm: f32,
}

/// Light sub-kind. Only point lights are exportable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Sun,
    Spot,
    Area,
}

/// Light data as stored by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightData {
    pub kind: LightKind,

    /// Radiant intensity in authoring-tool units
    pub energy: f32,
}

/// Mesh data as authored, before modifier evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// Name of the underlying mesh datablock, which can differ from the
    /// entity name and also participates in shape classification
    pub data_name: String,

    /// Raw authored vertex positions, local space
    pub vertices: Vec<Vec3>,
}

/// Kind-specific payload of a scene entity.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityData {
    Camera(CameraData),
    Light(LightData),
    Mesh(MeshData),
    Empty,
    Other,
}

/// Local transform components, kept decomposed the way the host stores
/// them: translation, intrinsic XYZ Euler rotation in radians, scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation as intrinsic XYZ Euler angles, radians
    pub rotation_euler: Vec3,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// One entity in the host scene graph, read-only to the exporter.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntity {
    /// Entity name, unique within the scene
    pub name: String,

    /// Local transform (own components only, no ancestors)
    pub transform: Transform,

    /// World matrix including all ancestor transforms
    pub world_matrix: Mat4,

    /// Kind-specific payload
    pub data: EntityData,
}

impl SceneEntity {
    /// The coarse kind of this entity, derived from its payload.
    pub fn kind(&self) -> EntityKind {
        match &self.data {
            EntityData::Camera(_) => EntityKind::Camera,
            EntityData::Light(_) => EntityKind::Light,
            EntityData::Mesh(_) => EntityKind::Mesh,
            EntityData::Empty => EntityKind::Empty,
            EntityData::Other => EntityKind::Other,
        }
    }

    /// World-space scale components, decomposed from the world matrix
    /// (product of ancestor and local scale).
    pub fn world_scale(&self) -> Vec3 {
        let (scale, _, _) = self.world_matrix.to_scale_rotation_translation();
        scale
    }
}

/// Global render settings exposed by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Base output width, pixels
    pub resolution_x: u32,

    /// Base output height, pixels
    pub resolution_y: u32,

    /// Resolution percentage scalar (100 = full size)
    pub resolution_percent: u32,
}

impl RenderSettings {
    /// Effective output resolution: `round(base * percent / 100)` per axis.
    pub fn effective_resolution(&self) -> [u32; 2] {
        let scale = |base: u32| (base as f64 * self.resolution_percent as f64 / 100.0).round() as u32;
        [scale(self.resolution_x), scale(self.resolution_y)]
    }
}

/// The host failed to produce evaluated geometry for an entity.
#[derive(Error, Debug)]
#[error("failed to evaluate geometry for '{entity}': {reason}")]
pub struct GeometryError {
    pub entity: String,
    pub reason: String,
}

/// Temporary evaluated (post-modifier) geometry, with guaranteed release.
///
/// The host may hand out geometry buffers it manages itself. Dropping this
/// guard runs the host's release hook, so the buffer is returned on every
/// exit path, including early error returns during extraction.
pub struct EvaluatedMesh {
    /// Final vertex positions after all modifiers, local space
    pub vertices: Vec<Vec3>,

    /// World matrix of the evaluated object, which hosts may report
    /// slightly differently from the original entity's
    pub world_matrix: Mat4,

    release: Option<Box<dyn FnOnce()>>,
}

impl EvaluatedMesh {
    /// Create an evaluated mesh with no release hook.
    pub fn new(vertices: Vec<Vec3>, world_matrix: Mat4) -> Self {
        Self {
            vertices,
            world_matrix,
            release: None,
        }
    }

    /// Attach a release hook, run exactly once when the guard drops.
    pub fn with_release(mut self, release: impl FnOnce() + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }
}

impl Drop for EvaluatedMesh {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for EvaluatedMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatedMesh")
            .field("vertices", &self.vertices.len())
            .field("world_matrix", &self.world_matrix)
            .finish()
    }
}

/// Read-only capability interface over the host scene graph.
///
/// The exporter consumes scenes exclusively through this trait; a test
/// fixture providing synthetic scenes is a drop-in substitute for the
/// live authoring tool.
pub trait SceneSource {
    /// Scene name, used in the output filename.
    fn name(&self) -> &str;

    /// Enumerate all entities in a single deterministic pass. Order is
    /// the host's enumeration order and must be stable across runs for
    /// an unchanged scene.
    fn entities(&self) -> Box<dyn Iterator<Item = &SceneEntity> + '_>;

    /// Global render settings for this scene.
    fn render_settings(&self) -> RenderSettings;

    /// Acquire the temporary evaluated mesh for an entity.
    fn evaluated_geometry(&self, entity: &SceneEntity) -> Result<EvaluatedMesh, GeometryError>;

    /// Directory of the current project file, if the scene has been saved.
    fn project_dir(&self) -> Option<PathBuf> {
        None
    }
}
