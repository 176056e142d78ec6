//! Canonical output records.
//!
//! The renderer-agnostic schema consumed by the offline ray tracer. Field
//! names and ordering here are the wire format; serde serializes struct
//! fields in declaration order, so the JSON key order below is stable.
//!
//! Note the deliberate asymmetry: `location`/`rotation_euler_radians`/
//! `scale` are the entity's LOCAL transform, while camera basis vectors
//! and plane corners inside the payloads are WORLD space.

use csd_math::Vec3;
use serde::Serialize;

/// Top-level record type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    Camera,
    Light,
    Mesh,
}

/// Camera payload: lens/sensor data plus the world-space viewing basis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CameraPayload {
    pub focal_length_mm: f32,
    pub sensor_width_mm: f32,
    pub sensor_height_mm: f32,

    /// Effective output resolution `[width, height]`, shared by every
    /// camera in the scene
    pub resolution_px: [u32; 2],

    /// Unit forward axis, world space
    pub gaze_dir_ws: Vec3,

    /// Unit up axis, world space (emitted only in full-basis mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_ws: Option<Vec3>,

    /// Unit right axis, world space (emitted only in full-basis mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_ws: Option<Vec3>,
}

/// Point light payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LightPayload {
    /// Light kind tag; only "POINT" is emitted
    pub kind: String,

    /// Radiant intensity, authoring-tool units
    pub radiant_intensity: f32,
}

impl LightPayload {
    pub fn point(radiant_intensity: f32) -> Self {
        Self {
            kind: "POINT".to_string(),
            radiant_intensity,
        }
    }
}

/// Sphere payload. Radius assumes the authored mesh is a unit sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpherePayload {
    /// Arithmetic mean of the three world-scale components
    pub radius: f32,
}

/// Cube payload.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CubePayload {
    /// Arithmetic mean of the three world-scale components
    pub uniform_scale: f32,
}

/// Plane payload: the first four evaluated vertices in native order,
/// world space. Winding and convexity are not verified.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlanePayload {
    pub corners_ws: [Vec3; 4],
}

/// One canonical scene entity, immutable once built.
///
/// Exactly one of the optional payloads is populated per record; omitted
/// payloads are skipped in the JSON output rather than serialized as null.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Local translation
    pub location: Vec3,

    /// Local rotation, intrinsic XYZ Euler, radians
    pub rotation_euler_radians: Vec3,

    /// Local scale
    pub scale: Vec3,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<LightPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sphere: Option<SpherePayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cube: Option<CubePayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plane: Option<PlanePayload>,
}

impl CanonicalRecord {
    /// A record with the common fields filled and no payload yet.
    pub fn new(name: String, record_type: RecordType, location: Vec3, rotation_euler_radians: Vec3, scale: Vec3) -> Self {
        Self {
            name,
            record_type,
            location,
            rotation_euler_radians,
            scale,
            camera: None,
            light: None,
            sphere: None,
            cube: None,
            plane: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let mut record = CanonicalRecord::new(
            "Light".to_string(),
            RecordType::Light,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::ONE,
        );
        record.light = Some(LightPayload::point(1000.0));

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "LIGHT");
        assert_eq!(json["location"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["light"]["kind"], "POINT");
        assert_eq!(json["light"]["radiant_intensity"], 1000.0);

        // Absent payloads are omitted, not serialized as null
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("camera"));
        assert!(!object.contains_key("sphere"));
        assert!(!object.contains_key("cube"));
        assert!(!object.contains_key("plane"));
    }

    #[test]
    fn test_camera_payload_optional_basis() {
        let payload = CameraPayload {
            focal_length_mm: 50.0,
            sensor_width_mm: 36.0,
            sensor_height_mm: 24.0,
            resolution_px: [960, 540],
            gaze_dir_ws: Vec3::NEG_Z,
            up_ws: None,
            right_ws: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["resolution_px"], serde_json::json!([960, 540]));
        assert!(!json.as_object().unwrap().contains_key("up_ws"));
        assert!(!json.as_object().unwrap().contains_key("right_ws"));
    }
}
