//! Integration tests for the camera and culling pipeline
//!
//! Run with: cargo test --test geometry_integration_tests

use scene_geometry::geometry::culling::{BoundingSphere, FrustumCuller, SphereCuller};
use scene_geometry::geometry::utils;
use scene_geometry::geometry::{
    Camera, Frame, Frustum, FrustumTest, GeometryError, Projection, Vector3f, Vector4f, PLANE_NEAR,
};
use serial_test::serial;

fn orbit_camera() -> Camera {
    let frame = Frame::from_axes(
        Vector3f::new(0.0, 0.0, 20.0),
        Vector3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
    );
    Camera::new(frame, Frustum::perspective(60.0, 1.0, 1.0, 100.0))
}

// ============================================================================
// CAMERA PIPELINE
// ============================================================================

#[test]
#[serial]
fn test_integration_camera_sees_target() {
    let camera = orbit_camera();
    let frustum = camera.frustum();

    assert!(frustum.in_view(&Vector3f::ZERO, 0.0));
    assert_eq!(frustum.classify_sphere(&Vector3f::ZERO, 1.0), FrustumTest::Inside);
    assert_eq!(frustum.classify_sphere(&Vector3f::new(0.0, 0.0, 40.0), 1.0), FrustumTest::Outside);
}

#[test]
#[serial]
fn test_integration_frustum_planes_agree_with_clip_space() {
    let camera = orbit_camera();
    let extracted = utils::extract_planes(&camera.view_projection_matrix());

    let probes = [
        Vector3f::ZERO,
        Vector3f::new(5.0, -3.0, 0.0),
        Vector3f::new(0.0, 0.0, 30.0),
        Vector3f::new(40.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -90.0),
    ];
    for probe in &probes {
        let from_clip = extracted.iter().all(|plane| utils::signed_distance(probe, plane) >= 0.0);
        assert_eq!(camera.frustum().in_view(probe, 0.0), from_clip, "probe {}", probe);
    }
}

#[test]
#[serial]
fn test_integration_orbit_and_cull() {
    let mut camera = orbit_camera();
    let spheres = [
        BoundingSphere::new(Vector3f::ZERO, 1.0),
        BoundingSphere::new(Vector3f::new(30.0, 0.0, 0.0), 1.0),
    ];
    let mut culler = FrustumCuller::new();

    assert_eq!(culler.cull(camera.frustum(), &spheres).visible(), &[0]);

    // Step to +X looking back at the origin: both spheres line up ahead
    camera.set_frame(Frame::from_axes(
        Vector3f::new(60.0, 0.0, 0.0),
        Vector3f::new(-1.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
    ));
    camera.update();
    assert_eq!(culler.cull(camera.frustum(), &spheres).visible(), &[0, 1]);
}

#[test]
#[serial]
fn test_integration_segment_entry() {
    let camera = orbit_camera();

    // From behind the camera toward the origin: enters through the near plane
    let entry = camera
        .frustum()
        .entry_point(&Vector3f::new(0.0, 0.0, 50.0), &Vector3f::ZERO)
        .unwrap();
    assert!((entry.z - 19.0).abs() < 1e-3);
    let near = camera.frustum().plane(PLANE_NEAR);
    assert!(utils::signed_distance(&entry, &near).abs() < 1e-3);
}

#[test]
#[serial]
fn test_integration_invalid_projection_rejected() {
    let result = Frustum::try_from_projection(Projection::Perspective {
        fov_degrees: 60.0,
        aspect: 1.0,
        near: 5.0,
        far: 5.0,
    });
    assert!(matches!(result, Err(GeometryError::InvalidProjection(_))));
}

#[test]
#[serial]
fn test_integration_shadow_lands_on_ground() {
    let ground = Vector4f::new(0.0, 1.0, 0.0, 0.0);
    let shadow = utils::planar_shadow_matrix(&ground, &Vector3f::new(0.0, 1.0, 0.0));

    let projected = shadow.transform_vector4(&Vector4f::new(3.0, 7.0, -2.0, 1.0));
    let flattened = projected.truncate() * (1.0 / projected.w);
    assert!((flattened - Vector3f::new(3.0, 0.0, -2.0)).length() < 1e-5);
}
