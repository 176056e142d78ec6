//! Example: Export a synthetic scene to canonical JSON.
//!
//! Run with: cargo run --example export_demo

use anyhow::Result;
use csd_core::export::{build_document, export_scene, ExportConfig};
use csd_core::fixture::FixtureScene;
use csd_core::scene::Transform;
use csd_math::Vec3;

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = FixtureScene::new("demo");
    scene.camera(
        "Camera",
        Transform {
            translation: Vec3::new(0.0, -10.0, 4.0),
            rotation_euler: Vec3::new(1.2, 0.0, 0.0),
            scale: Vec3::ONE,
        },
        50.0,
        36.0,
        24.0,
    );
    scene.point_light("Key", Transform::from_translation(Vec3::new(4.0, -4.0, 8.0)), 1000.0);
    scene.unit_sphere(
        "Sphere",
        Transform {
            translation: Vec3::new(0.0, 0.0, 1.0),
            rotation_euler: Vec3::ZERO,
            scale: Vec3::new(1.5, 1.5, 1.5),
        },
    );
    scene.unit_cube("Cube", Transform::from_translation(Vec3::new(3.0, 1.0, 1.0)));
    scene.unit_plane(
        "GroundPlane",
        Transform {
            scale: Vec3::new(10.0, 10.0, 1.0),
            ..Default::default()
        },
    );

    let config = ExportConfig::default();

    let records = build_document(&scene, &config)?;
    println!("=== Scene: demo ===");
    for record in &records {
        println!(
            "  {:<12} {:?} at ({:.2}, {:.2}, {:.2})",
            record.name,
            record.record_type,
            record.location.x,
            record.location.y,
            record.location.z
        );
    }

    // No project dir on the fixture, so this lands in the temp dir;
    // the resolved path is logged at info level.
    export_scene(&scene, &config)?;

    Ok(())
}
