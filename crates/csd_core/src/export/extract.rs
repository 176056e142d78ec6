//! Entity extraction.
//!
//! Builds one [`CanonicalRecord`] per classified entity. The common
//! transform fields are always the entity's local components; the
//! kind-specific payloads are where world-space values appear.

use csd_math::{camera_basis, Vec3};

use crate::scene::{CameraData, EntityData, SceneEntity, SceneSource};

use super::classify::ShapeClass;
use super::config::{CameraBasisMode, ExportConfig, PlaneCornerMatrix};
use super::record::{
    CameraPayload, CanonicalRecord, CubePayload, LightPayload, PlanePayload, RecordType,
    SpherePayload,
};
use super::{ExportError, ExportResult};

/// Per-pass extractor.
///
/// Holds the host handle, the export configuration, and the effective
/// output resolution, which is computed once per scene and reused for
/// every camera record.
pub struct Extractor<'a> {
    source: &'a dyn SceneSource,
    config: &'a ExportConfig,
    resolution_px: [u32; 2],
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a dyn SceneSource, config: &'a ExportConfig, resolution_px: [u32; 2]) -> Self {
        Self {
            source,
            config,
            resolution_px,
        }
    }

    /// Build the canonical record for an entity.
    ///
    /// Returns `Ok(None)` for `Unsupported` classifications: such entities
    /// are excluded from the document entirely, no placeholder is emitted.
    pub fn extract(&self, entity: &SceneEntity, class: ShapeClass) -> ExportResult<Option<CanonicalRecord>> {
        let record_type = match class {
            ShapeClass::Camera => RecordType::Camera,
            ShapeClass::PointLight => RecordType::Light,
            ShapeClass::Sphere | ShapeClass::Cube | ShapeClass::Plane => RecordType::Mesh,
            ShapeClass::Unsupported => return Ok(None),
        };

        let mut record = CanonicalRecord::new(
            entity.name.clone(),
            record_type,
            entity.transform.translation,
            entity.transform.rotation_euler,
            entity.transform.scale,
        );

        match (class, &entity.data) {
            (ShapeClass::Camera, EntityData::Camera(camera)) => {
                record.camera = Some(self.camera_payload(entity, camera)?);
            }
            (ShapeClass::PointLight, EntityData::Light(light)) => {
                record.light = Some(LightPayload::point(light.energy));
            }
            (ShapeClass::Sphere, _) => {
                record.sphere = Some(SpherePayload {
                    radius: mean_world_scale(entity),
                });
            }
            (ShapeClass::Cube, _) => {
                record.cube = Some(CubePayload {
                    uniform_scale: mean_world_scale(entity),
                });
            }
            (ShapeClass::Plane, _) => {
                record.plane = Some(self.plane_payload(entity)?);
            }
            // A classification that disagrees with the entity payload
            // cannot come out of classify(); emit nothing for it.
            _ => return Ok(None),
        }

        Ok(Some(record))
    }

    fn camera_payload(&self, entity: &SceneEntity, camera: &CameraData) -> ExportResult<CameraPayload> {
        let basis =
            camera_basis(entity.world_matrix).ok_or_else(|| ExportError::DegenerateTransform {
                entity: entity.name.clone(),
            })?;

        let (up_ws, right_ws) = match self.config.camera_basis {
            CameraBasisMode::Full => (Some(basis.up), Some(basis.right)),
            CameraBasisMode::GazeOnly => (None, None),
        };

        Ok(CameraPayload {
            focal_length_mm: camera.focal_length_mm,
            sensor_width_mm: camera.sensor_width_mm,
            sensor_height_mm: camera.sensor_height_mm,
            resolution_px: self.resolution_px,
            gaze_dir_ws: basis.gaze,
            up_ws,
            right_ws,
        })
    }

    /// Read the first four evaluated vertices and lift them to world space.
    ///
    /// The evaluated mesh is a host-managed temporary; the guard drops as
    /// soon as the corners are read, on the error path included.
    fn plane_payload(&self, entity: &SceneEntity) -> ExportResult<PlanePayload> {
        let mesh = self.source.evaluated_geometry(entity)?;

        if mesh.vertices.len() < 4 {
            return Err(ExportError::MalformedPlaneMesh {
                entity: entity.name.clone(),
                vertex_count: mesh.vertices.len(),
            });
        }

        let matrix = match self.config.plane_corners {
            PlaneCornerMatrix::Evaluated => mesh.world_matrix,
            PlaneCornerMatrix::Original => entity.world_matrix,
        };

        let mut corners_ws = [Vec3::ZERO; 4];
        for (corner, vertex) in corners_ws.iter_mut().zip(&mesh.vertices) {
            *corner = matrix.transform_point3(*vertex);
        }
        drop(mesh);

        Ok(PlanePayload { corners_ws })
    }
}

fn mean_world_scale(entity: &SceneEntity) -> f32 {
    let scale = entity.world_scale();
    (scale.x + scale.y + scale.z) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureScene;
    use crate::scene::Transform;
    use csd_math::{Mat4, Quat};

    fn extractor_resolution(source: &FixtureScene) -> [u32; 2] {
        source.render_settings().effective_resolution()
    }

    fn extract_one(source: &FixtureScene, config: &ExportConfig, index: usize) -> ExportResult<Option<CanonicalRecord>> {
        let extractor = Extractor::new(source, config, extractor_resolution(source));
        let entity = source.entity(index);
        extractor.extract(entity, super::super::classify(entity))
    }

    #[test]
    fn test_extract_camera_full_basis() {
        let mut scene = FixtureScene::new("test");
        scene.camera(
            "Camera",
            Transform {
                translation: Vec3::new(0.0, -5.0, 2.0),
                rotation_euler: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                scale: Vec3::ONE,
            },
            50.0,
            36.0,
            24.0,
        );

        let config = ExportConfig::default();
        let record = extract_one(&scene, &config, 0).unwrap().unwrap();
        let camera = record.camera.as_ref().unwrap();

        assert_eq!(record.record_type, RecordType::Camera);
        assert_eq!(camera.focal_length_mm, 50.0);
        assert_eq!(camera.resolution_px, [1920, 1080]);

        // Local transform fields stay local
        assert_eq!(record.location, Vec3::new(0.0, -5.0, 2.0));

        // 90 degrees around X tilts local -Z onto +Y
        let gaze = camera.gaze_dir_ws;
        assert!((gaze - Vec3::Y).length() < 1e-5);
        assert!(camera.up_ws.is_some());
        assert!(camera.right_ws.is_some());
    }

    #[test]
    fn test_extract_camera_gaze_only() {
        let mut scene = FixtureScene::new("test");
        scene.camera("Camera", Transform::default(), 35.0, 36.0, 24.0);

        let config = ExportConfig {
            camera_basis: CameraBasisMode::GazeOnly,
            ..Default::default()
        };
        let record = extract_one(&scene, &config, 0).unwrap().unwrap();
        let camera = record.camera.unwrap();

        assert!((camera.gaze_dir_ws - Vec3::NEG_Z).length() < 1e-6);
        assert!(camera.up_ws.is_none());
        assert!(camera.right_ws.is_none());
    }

    #[test]
    fn test_extract_camera_degenerate_transform() {
        let mut scene = FixtureScene::new("test");
        let index = scene.camera("Camera", Transform::default(), 50.0, 36.0, 24.0);
        scene.entity_mut(index).world_matrix = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));

        let config = ExportConfig::default();
        let err = extract_one(&scene, &config, index).unwrap_err();
        assert!(matches!(err, ExportError::DegenerateTransform { .. }));
    }

    #[test]
    fn test_extract_point_light() {
        let mut scene = FixtureScene::new("test");
        scene.point_light("Key", Transform::from_translation(Vec3::new(4.0, 1.0, 6.0)), 1000.0);

        let config = ExportConfig::default();
        let record = extract_one(&scene, &config, 0).unwrap().unwrap();
        let light = record.light.unwrap();

        assert_eq!(record.record_type, RecordType::Light);
        assert_eq!(light.kind, "POINT");
        assert_eq!(light.radiant_intensity, 1000.0);
    }

    #[test]
    fn test_extract_sphere_mean_world_scale() {
        let mut scene = FixtureScene::new("test");
        let index = scene.unit_sphere(
            "Sphere",
            Transform {
                scale: Vec3::new(2.0, 2.0, 2.0),
                ..Default::default()
            },
        );

        let config = ExportConfig::default();
        let record = extract_one(&scene, &config, index).unwrap().unwrap();
        assert_eq!(record.sphere.unwrap().radius, 2.0);

        // Non-uniform world scale averages without error
        let index = scene.unit_sphere(
            "Sphere.001",
            Transform {
                scale: Vec3::new(1.0, 2.0, 3.0),
                ..Default::default()
            },
        );
        let record = extract_one(&scene, &config, index).unwrap().unwrap();
        assert!((record.sphere.unwrap().radius - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_extract_cube_uniform_scale() {
        let mut scene = FixtureScene::new("test");
        let index = scene.unit_cube(
            "Cube",
            Transform {
                scale: Vec3::new(3.0, 3.0, 3.0),
                ..Default::default()
            },
        );

        let config = ExportConfig::default();
        let record = extract_one(&scene, &config, index).unwrap().unwrap();
        assert_eq!(record.cube.unwrap().uniform_scale, 3.0);
    }

    #[test]
    fn test_extract_plane_corners_world_space() {
        let mut scene = FixtureScene::new("test");
        let transform = Transform {
            translation: Vec3::new(0.0, 0.0, -1.0),
            rotation_euler: Vec3::ZERO,
            scale: Vec3::new(2.0, 2.0, 1.0),
        };
        let index = scene.unit_plane("Plane", transform);

        let config = ExportConfig::default();
        let record = extract_one(&scene, &config, index).unwrap().unwrap();
        let plane = record.plane.unwrap();

        // Inverse world transform reproduces the local vertices
        let inverse = scene.entity(index).world_matrix.inverse();
        let local: Vec<Vec3> = plane
            .corners_ws
            .iter()
            .map(|&corner| inverse.transform_point3(corner))
            .collect();
        let expected = FixtureScene::plane_vertices();
        for (back, original) in local.iter().zip(expected.iter()) {
            assert!((*back - *original).length() < 1e-5);
        }
    }

    #[test]
    fn test_extract_plane_corner_matrix_variant() {
        let mut scene = FixtureScene::new("test");
        let index = scene.unit_plane("Plane", Transform::default());

        // Make the evaluated matrix differ from the entity's
        let evaluated = Mat4::from_rotation_translation(Quat::IDENTITY, Vec3::new(10.0, 0.0, 0.0));
        scene.set_evaluated_matrix(index, evaluated);

        let evaluated_config = ExportConfig::default();
        let record = extract_one(&scene, &evaluated_config, index).unwrap().unwrap();
        assert!((record.plane.unwrap().corners_ws[0].x - 9.0).abs() < 1e-5);

        let original_config = ExportConfig {
            plane_corners: PlaneCornerMatrix::Original,
            ..Default::default()
        };
        let record = extract_one(&scene, &original_config, index).unwrap().unwrap();
        assert!((record.plane.unwrap().corners_ws[0].x - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_extract_plane_too_few_vertices() {
        let mut scene = FixtureScene::new("test");
        let index = scene.mesh("BrokenPlane", "Plane", Transform::default(), vec![Vec3::ZERO, Vec3::X]);

        let config = ExportConfig::default();
        let err = extract_one(&scene, &config, index).unwrap_err();
        assert!(matches!(
            err,
            ExportError::MalformedPlaneMesh { vertex_count: 2, .. }
        ));

        // The temporary mesh is released even on the error path
        assert_eq!(scene.release_count(), 1);
    }

    #[test]
    fn test_extract_plane_releases_evaluated_mesh() {
        let mut scene = FixtureScene::new("test");
        let index = scene.unit_plane("Plane", Transform::default());

        let config = ExportConfig::default();
        extract_one(&scene, &config, index).unwrap().unwrap();
        assert_eq!(scene.release_count(), 1);
    }

    #[test]
    fn test_extract_unsupported_is_none() {
        let mut scene = FixtureScene::new("test");
        let index = scene.mesh("MyLamp", "Suzanne", Transform::default(), vec![Vec3::ZERO]);

        let config = ExportConfig::default();
        assert!(extract_one(&scene, &config, index).unwrap().is_none());
    }
}
