//! Shape classification.
//!
//! Maps a host entity to one of the closed set of shapes the canonical
//! schema knows how to describe. Mesh entities are recognized by a naming
//! heuristic: case-insensitive substring match of a shape token in either
//! the entity name or the underlying mesh datablock name.

use crate::scene::{EntityData, LightKind, MeshData, SceneEntity};

/// What an entity exports as. `Unsupported` entities are excluded from the
/// output entirely; no placeholder record is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeClass {
    Camera,
    PointLight,
    Sphere,
    Cube,
    Plane,
    Unsupported,
}

/// Classify a scene entity.
///
/// Decision order, first match wins: camera kind, then point light, then
/// mesh name tokens in priority order sphere > cube > plane. The priority
/// order is the tie-break when a name incidentally matches more than one
/// token. Non-point lights and token-less meshes are `Unsupported`.
pub fn classify(entity: &SceneEntity) -> ShapeClass {
    match &entity.data {
        EntityData::Camera(_) => ShapeClass::Camera,
        EntityData::Light(light) if light.kind == LightKind::Point => ShapeClass::PointLight,
        EntityData::Mesh(mesh) => {
            if name_matches(entity, mesh, "sphere") {
                ShapeClass::Sphere
            } else if name_matches(entity, mesh, "cube") {
                ShapeClass::Cube
            } else if name_matches(entity, mesh, "plane") {
                ShapeClass::Plane
            } else {
                ShapeClass::Unsupported
            }
        }
        _ => ShapeClass::Unsupported,
    }
}

fn name_matches(entity: &SceneEntity, mesh: &MeshData, token: &str) -> bool {
    entity.name.to_lowercase().contains(token) || mesh.data_name.to_lowercase().contains(token)
}
