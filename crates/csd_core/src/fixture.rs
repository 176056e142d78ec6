//! Synthetic scene host.
//!
//! [`FixtureScene`] is an in-memory [`SceneSource`] standing in for the
//! live authoring tool: tests and the demo example build scenes with the
//! helpers here instead of driving a real scene graph. Every temporary
//! evaluated mesh it hands out increments a release counter when its
//! guard drops, so scoped-release behavior is observable.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use csd_math::{Mat4, Vec3};

use crate::scene::{
    CameraData, EntityData, EvaluatedMesh, GeometryError, LightData, LightKind, MeshData,
    RenderSettings, SceneEntity, SceneSource, Transform,
};

/// An in-memory scene with builder helpers for the exportable kinds.
pub struct FixtureScene {
    name: String,
    entities: Vec<SceneEntity>,

    /// Per-entity world matrix reported with the evaluated mesh, where it
    /// should differ from the entity's own
    evaluated_matrices: Vec<Option<Mat4>>,

    settings: RenderSettings,
    project_dir: Option<PathBuf>,
    releases: Rc<Cell<usize>>,
}

impl FixtureScene {
    /// An empty scene at 1920x1080, 100%.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            evaluated_matrices: Vec::new(),
            settings: RenderSettings {
                resolution_x: 1920,
                resolution_y: 1080,
                resolution_percent: 100,
            },
            project_dir: None,
            releases: Rc::new(Cell::new(0)),
        }
    }

    /// Vertices of the canonical unit plane, native order.
    pub fn plane_vertices() -> [Vec3; 4] {
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    pub fn set_render_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    pub fn set_project_dir(&mut self, dir: impl Into<PathBuf>) {
        self.project_dir = Some(dir.into());
    }

    /// Override the world matrix reported with an entity's evaluated mesh.
    pub fn set_evaluated_matrix(&mut self, index: usize, matrix: Mat4) {
        self.evaluated_matrices[index] = Some(matrix);
    }

    /// How many evaluated-mesh guards have been released so far.
    pub fn release_count(&self) -> usize {
        self.releases.get()
    }

    pub fn entity(&self, index: usize) -> &SceneEntity {
        &self.entities[index]
    }

    pub fn entity_mut(&mut self, index: usize) -> &mut SceneEntity {
        &mut self.entities[index]
    }

    fn add(&mut self, name: &str, transform: Transform, data: EntityData) -> usize {
        let index = self.entities.len();
        self.entities.push(SceneEntity {
            name: name.to_string(),
            world_matrix: transform.to_matrix(),
            transform,
            data,
        });
        self.evaluated_matrices.push(None);
        index
    }

    /// Add a camera entity and return its index.
    pub fn camera(
        &mut self,
        name: &str,
        transform: Transform,
        focal_length_mm: f32,
        sensor_width_mm: f32,
        sensor_height_mm: f32,
    ) -> usize {
        self.add(
            name,
            transform,
            EntityData::Camera(CameraData {
                focal_length_mm,
                sensor_width_mm,
                sensor_height_mm,
            }),
        )
    }

    /// Add a point light entity and return its index.
    pub fn point_light(&mut self, name: &str, transform: Transform, energy: f32) -> usize {
        self.light(name, transform, LightKind::Point, energy)
    }

    /// Add a light of any sub-kind and return its index.
    pub fn light(&mut self, name: &str, transform: Transform, kind: LightKind, energy: f32) -> usize {
        self.add(name, transform, EntityData::Light(LightData { kind, energy }))
    }

    /// Add a mesh entity with explicit vertices and return its index.
    pub fn mesh(&mut self, name: &str, data_name: &str, transform: Transform, vertices: Vec<Vec3>) -> usize {
        self.add(
            name,
            transform,
            EntityData::Mesh(MeshData {
                data_name: data_name.to_string(),
                vertices,
            }),
        )
    }

    /// Add a unit sphere mesh (octahedron point set stands in for the
    /// tessellated vertices, which sphere export never reads).
    pub fn unit_sphere(&mut self, name: &str, transform: Transform) -> usize {
        let vertices = vec![
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        self.mesh(name, "Sphere", transform, vertices)
    }

    /// Add a unit cube mesh.
    pub fn unit_cube(&mut self, name: &str, transform: Transform) -> usize {
        let mut vertices = Vec::with_capacity(8);
        for &x in &[-1.0f32, 1.0] {
            for &y in &[-1.0f32, 1.0] {
                for &z in &[-1.0f32, 1.0] {
                    vertices.push(Vec3::new(x, y, z));
                }
            }
        }
        self.mesh(name, "Cube", transform, vertices)
    }

    /// Add a unit plane mesh.
    pub fn unit_plane(&mut self, name: &str, transform: Transform) -> usize {
        self.mesh(name, "Plane", transform, Self::plane_vertices().to_vec())
    }

    /// Add a non-renderable helper entity.
    pub fn empty(&mut self, name: &str, transform: Transform) -> usize {
        self.add(name, transform, EntityData::Empty)
    }
}

impl SceneSource for FixtureScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn entities(&self) -> Box<dyn Iterator<Item = &SceneEntity> + '_> {
        Box::new(self.entities.iter())
    }

    fn render_settings(&self) -> RenderSettings {
        self.settings
    }

    fn evaluated_geometry(&self, entity: &SceneEntity) -> Result<EvaluatedMesh, GeometryError> {
        let index = self
            .entities
            .iter()
            .position(|candidate| candidate.name == entity.name)
            .ok_or_else(|| GeometryError {
                entity: entity.name.clone(),
                reason: "entity is not part of this scene".to_string(),
            })?;

        let EntityData::Mesh(mesh) = &self.entities[index].data else {
            return Err(GeometryError {
                entity: entity.name.clone(),
                reason: "entity has no mesh data".to_string(),
            });
        };

        // No modifiers in the fixture: evaluated vertices == authored ones
        let world_matrix = self.evaluated_matrices[index].unwrap_or(entity.world_matrix);
        let releases = self.releases.clone();

        Ok(
            EvaluatedMesh::new(mesh.vertices.clone(), world_matrix)
                .with_release(move || releases.set(releases.get() + 1)),
        )
    }

    fn project_dir(&self) -> Option<PathBuf> {
        self.project_dir.clone()
    }
}
