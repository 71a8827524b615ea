use super::*;
use std::f32::consts::FRAC_PI_2;

fn transformed(mut frustum: Frustum, frame: &Frame) -> Frustum {
    frustum.transform(frame);
    frustum
}

/// Component-wise, relative to the magnitude of the expected value
fn assert_plane_near(actual: Vector4f, expected: Vector4f, epsilon: f32) {
    let close = (0..4).all(|i| (actual[i] - expected[i]).abs() < epsilon * (1.0 + expected[i].abs()));
    assert!(close, "expected ({}), got ({})", expected, actual);
}

/// Camera at `origin` looking down -Z
fn camera_at(x: f32, y: f32, z: f32) -> Frame {
    let mut frame = Frame::new();
    frame.set_origin(Vector3f::new(x, y, z));
    frame
}

// ============================================================================
// Projection matrices
// ============================================================================

#[test]
fn test_perspective_projection_matrix() {
    let frustum = Frustum::perspective(120.0, 1.0, 8.0, 102.0);
    let a = frustum.projection_matrix().as_array();
    let expected = 1.0 / 60.0_f32.to_radians().tan();
    assert!((a[0] - expected).abs() < 1e-5);
    assert!((a[5] - expected).abs() < 1e-5);
    assert!((a[0] - 0.57735).abs() < 1e-5);
    assert_eq!(a[11], -1.0);
    assert_eq!(a[15], 0.0);
}

#[test]
fn test_orthographic_projection_matrix() {
    let frustum = Frustum::orthographic(-10.0, 20.0, -30.0, 40.0, -50.0, 40.0);
    let a = frustum.projection_matrix().as_array();
    assert_eq!(a[15], 1.0);
    assert!((a[12] - -(20.0 + -10.0) / (20.0 - -10.0)).abs() < 1e-6);
    assert!((a[13] - -(40.0 + -30.0) / (40.0 - -30.0)).abs() < 1e-6);
    assert!((a[14] - -(40.0 + -50.0) / (40.0 - -50.0)).abs() < 1e-6);
}

#[test]
fn test_asymmetric_projection_uses_near_bounds() {
    let frustum = Frustum::asymmetric_perspective(60.0, 1.0, -1.0, 3.0, -2.0, 1.0, 1.0, 50.0);
    let expected = Matrix44f::frustum(-1.0, 3.0, -2.0, 1.0, 1.0, 50.0);
    assert_eq!(*frustum.projection_matrix(), expected);
}

#[test]
fn test_default_frustum_is_unit_cube() {
    let frustum = Frustum::default();
    assert_eq!(frustum.projection(), Projection::default());
    assert!(!frustum.is_transformed());
    assert_eq!(frustum.corners()[CORNER_NEAR_UL], Vector3f::new(-1.0, 1.0, 1.0));
    assert_eq!(frustum.corners()[CORNER_FAR_LR], Vector3f::new(1.0, -1.0, -1.0));
}

// ============================================================================
// Corners
// ============================================================================

#[test]
fn test_perspective_corners() {
    let frustum = Frustum::perspective(90.0, 2.0, 1.0, 10.0);
    let c = frustum.corners();
    // tan(45°) = 1: half height equals depth, half width twice that
    let near = Vector3f::new(-2.0, 1.0, -1.0);
    let far = Vector3f::new(20.0, -10.0, -10.0);
    assert!(c[CORNER_NEAR_UL].distance(&near) < 1e-5);
    assert!(c[CORNER_FAR_LR].distance(&far) < 1e-4);
    assert_eq!(c[CORNER_NEAR_LL].z, -1.0);
    assert_eq!(c[CORNER_FAR_UR].z, -10.0);
}

#[test]
fn test_asymmetric_far_corners_match_symmetric() {
    let symmetric = Frustum::perspective(75.0, 1.25, 2.0, 80.0);
    let asymmetric = Frustum::asymmetric_perspective(75.0, 1.25, -0.5, 3.0, -1.0, 0.25, 2.0, 80.0);
    for index in [CORNER_FAR_UL, CORNER_FAR_LL, CORNER_FAR_UR, CORNER_FAR_LR] {
        assert_eq!(symmetric.corners()[index], asymmetric.corners()[index]);
    }
    assert_eq!(asymmetric.corners()[CORNER_NEAR_UR], Vector3f::new(3.0, 0.25, -2.0));
}

#[test]
fn test_reconfigure_clears_transformed_flag() {
    let mut frustum = transformed(Frustum::perspective(60.0, 1.0, 1.0, 100.0), &Frame::new());
    assert!(frustum.is_transformed());
    frustum.set_orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0);
    assert!(!frustum.is_transformed());
    assert!(!frustum.projection().is_perspective());
}

// ============================================================================
// Transform and planes
// ============================================================================

#[test]
fn test_default_frame_reproduces_untransformed_planes() {
    for frustum in [
        Frustum::perspective(60.0, 1.5, 1.0, 100.0),
        Frustum::orthographic(-10.0, 20.0, -30.0, 40.0, -50.0, 40.0),
        Frustum::asymmetric_perspective(45.0, 1.0, -0.2, 0.6, -0.4, 0.3, 0.5, 30.0),
    ] {
        let frustum = transformed(frustum, &Frame::new());
        let expected = planes_from_corners(frustum.corners());
        for (plane, expected) in frustum.planes().iter().zip(expected.iter()) {
            assert_plane_near(*plane, *expected, 1e-4);
        }
    }
}

#[test]
fn test_unit_cube_planes_point_inward() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    assert_eq!(frustum.plane(PLANE_NEAR), Vector4f::new(0.0, 0.0, -1.0, 1.0));
    assert_eq!(frustum.plane(PLANE_FAR), Vector4f::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(frustum.plane(PLANE_LEFT), Vector4f::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(frustum.plane(PLANE_RIGHT), Vector4f::new(-1.0, 0.0, 0.0, 1.0));
    assert_eq!(frustum.plane(PLANE_TOP), Vector4f::new(0.0, -1.0, 0.0, 1.0));
    assert_eq!(frustum.plane(PLANE_BOTTOM), Vector4f::new(0.0, 1.0, 0.0, 1.0));
}

#[test]
fn test_planes_match_view_projection_extraction() {
    let mut frame = camera_at(4.0, -3.0, 12.0);
    frame.rotate_world(0.6, 0.3, 1.0, -0.2);
    frame.normalize();

    for frustum in [
        Frustum::perspective(60.0, 1.5, 1.0, 100.0),
        Frustum::orthographic(-10.0, 20.0, -30.0, 40.0, 5.0, 40.0),
    ] {
        let frustum = transformed(frustum, &frame);
        let view_projection = *frustum.projection_matrix() * frame.camera_matrix(false);
        let extracted = utils::extract_planes(&view_projection);
        for (plane, expected) in frustum.planes().iter().zip(extracted.iter()) {
            assert_plane_near(*plane, *expected, 1e-3);
        }
    }
}

#[test]
fn test_transform_moves_corners() {
    let frustum = transformed(Frustum::new(), &camera_at(5.0, 0.0, 0.0));
    for (world, local) in frustum.transformed_corners().iter().zip(frustum.corners().iter()) {
        assert_eq!(*world, *local + Vector3f::new(5.0, 0.0, 0.0));
    }
}

#[test]
fn test_transform_follows_rotation() {
    let mut frame = Frame::new();
    frame.rotate_local_y(FRAC_PI_2); // now looking down -X
    let frustum = transformed(Frustum::perspective(60.0, 1.0, 1.0, 100.0), &frame);
    assert!(frustum.in_view(&Vector3f::new(-50.0, 0.0, 0.0), 0.0));
    assert!(!frustum.in_view(&Vector3f::new(50.0, 0.0, 0.0), 0.0));
    assert!(!frustum.in_view(&Vector3f::new(0.0, 0.0, -50.0), 0.0));
}

// ============================================================================
// in_view / test_sphere
// ============================================================================

#[test]
fn test_in_view_before_transform_is_false() {
    let frustum = Frustum::new();
    assert!(!frustum.in_view(&Vector3f::ZERO, 0.0));
    assert!(!frustum.test_sphere(&Vector3f::ZERO, 100.0));
}

#[test]
fn test_in_view_boundary_is_inclusive() {
    let frustum = transformed(
        Frustum::orthographic(-10.0, 20.0, -30.0, 40.0, -50.0, 40.0),
        &Frame::new(),
    );
    let epsilon = 1e-3;
    // Near face sits at z = 50, far face at z = -40
    let on_faces = [
        (Vector3f::new(20.0, 0.0, 0.0), Vector3f::X),
        (Vector3f::new(-10.0, 0.0, 0.0), -Vector3f::X),
        (Vector3f::new(0.0, 40.0, 0.0), Vector3f::Y),
        (Vector3f::new(0.0, -30.0, 0.0), -Vector3f::Y),
        (Vector3f::new(0.0, 0.0, 50.0), Vector3f::Z),
        (Vector3f::new(0.0, 0.0, -40.0), -Vector3f::Z),
    ];
    for (point, outward) in on_faces {
        assert!(frustum.in_view(&point, 0.0), "{} should be inside", point);
        let beyond = point + outward * epsilon;
        assert!(!frustum.in_view(&beyond, 0.0), "{} should be outside", beyond);
    }
    // A corner lies on three planes at once
    assert!(frustum.in_view(&Vector3f::new(20.0, 40.0, -40.0), 0.0));
}

#[test]
fn test_sphere_radius_extends_view() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    let outside = Vector3f::new(1.5, 0.0, 0.0);
    assert!(!frustum.test_sphere(&outside, 0.4));
    assert!(frustum.test_sphere(&outside, 0.5));
    assert!(frustum.test_sphere(&outside, 0.6));
}

#[test]
fn test_perspective_view_volume() {
    let frustum = transformed(Frustum::perspective(90.0, 1.0, 1.0, 100.0), &camera_at(0.0, 0.0, 10.0));
    assert!(frustum.in_view(&Vector3f::ZERO, 0.0));
    assert!(frustum.in_view(&Vector3f::new(0.0, 0.0, 9.0), 0.0)); // exactly on near
    assert!(!frustum.in_view(&Vector3f::new(0.0, 0.0, 9.5), 0.0)); // before near
    assert!(!frustum.in_view(&Vector3f::new(0.0, 0.0, 11.0), 0.0)); // behind the eye
    assert!(!frustum.in_view(&Vector3f::new(0.0, 0.0, -95.0), 0.0)); // past far
    // 90° fov: at 10 units ahead the half width is 10
    assert!(frustum.in_view(&Vector3f::new(9.9, 0.0, 0.0), 0.0));
    assert!(!frustum.in_view(&Vector3f::new(10.1, 0.0, 0.0), 0.0));
}

#[test]
fn test_signed_distance_does_not_need_unit_normals() {
    let mut frustum = transformed(Frustum::new(), &Frame::new());
    // Same planes scaled by 4: containment answers must not change
    for plane in frustum.planes.iter_mut() {
        *plane = *plane * 4.0;
    }
    assert!(frustum.in_view(&Vector3f::new(1.0, 0.0, 0.0), 0.0));
    assert!(!frustum.in_view(&Vector3f::new(1.2, 0.0, 0.0), 0.1));
    assert!(frustum.in_view(&Vector3f::new(1.2, 0.0, 0.0), 0.25));
}

// ============================================================================
// Checked queries
// ============================================================================

#[test]
fn test_checked_queries_require_transform() {
    let frustum = Frustum::new();
    assert!(matches!(
        frustum.checked_in_view(&Vector3f::ZERO, 0.0),
        Err(GeometryError::NotTransformed(_))
    ));
    assert!(matches!(
        frustum.checked_entry_point(&Vector3f::ZERO, &Vector3f::X),
        Err(GeometryError::NotTransformed(_))
    ));

    let frustum = transformed(frustum, &Frame::new());
    assert_eq!(frustum.checked_in_view(&Vector3f::ZERO, 0.0), Ok(true));
    assert_eq!(
        frustum.checked_entry_point(&Vector3f::ZERO, &Vector3f::X),
        Ok(Some(Vector3f::ZERO))
    );
}

#[test]
fn test_try_from_projection() {
    let ok = Frustum::try_from_projection(Projection::Perspective {
        fov_degrees: 60.0, aspect: 1.0, near: 1.0, far: 10.0,
    });
    assert!(ok.is_ok());

    let bad = Frustum::try_from_projection(Projection::Perspective {
        fov_degrees: 60.0, aspect: 1.0, near: 10.0, far: 10.0,
    });
    assert!(matches!(bad, Err(GeometryError::InvalidProjection(_))));
}

// ============================================================================
// entry_point
// ============================================================================

#[test]
fn test_entry_point_inside_returns_initial() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    let initial = Vector3f::new(0.25, -0.5, 0.75);
    assert_eq!(frustum.entry_point(&initial, &Vector3f::new(9.0, 9.0, 9.0)), Some(initial));
}

#[test]
fn test_entry_point_picks_closest_face() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    let entry = frustum
        .entry_point(&Vector3f::new(0.0, 0.0, 5.0), &Vector3f::ZERO)
        .expect("line crosses the cube");
    // Crosses both near (z = 1) and far (z = -1); near is closer
    assert!(entry.distance(&Vector3f::new(0.0, 0.0, 1.0)) < 1e-5);
}

#[test]
fn test_entry_point_ignores_segment_bounds() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    // Both points beyond the near face, pointing away: the line still hits
    let entry = frustum.entry_point(&Vector3f::new(0.0, 0.0, 5.0), &Vector3f::new(0.0, 0.0, 6.0));
    assert!(entry.is_some_and(|p| p.distance(&Vector3f::new(0.0, 0.0, 1.0)) < 1e-5));
}

#[test]
fn test_entry_point_misses() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    let entry = frustum.entry_point(&Vector3f::new(5.0, 0.0, 5.0), &Vector3f::new(6.0, 0.0, 5.0));
    assert_eq!(entry, None);
}

#[test]
fn test_entry_point_tolerance_radius() {
    let mut frustum = transformed(Frustum::new(), &Frame::new());
    // The line x = 1.05 grazes the cube: hits are 0.05 outside the right face
    let initial = Vector3f::new(1.05, 0.0, 5.0);
    let end = Vector3f::new(1.05, 0.0, 0.0);
    assert!(frustum.entry_point(&initial, &end).is_some());

    frustum.set_tolerance(Tolerance { entry_point_radius: 0.01, ..Tolerance::DEFAULT });
    assert_eq!(frustum.entry_point(&initial, &end), None);
}

#[test]
fn test_face_intersection() {
    let plane = Vector4f::new(0.0, 0.0, -1.0, 1.0); // z = 1
    let hit = Frustum::face_intersection(
        &Vector3f::new(2.0, 3.0, 5.0),
        &Vector3f::new(2.0, 3.0, -5.0),
        &plane,
    );
    assert!(hit.distance(&Vector3f::new(2.0, 3.0, 1.0)) < 1e-5);
    assert_eq!(Frustum::point_on_plane(&plane), Vector3f::new(0.0, 0.0, 1.0));
}

// ============================================================================
// get_copy
// ============================================================================

#[test]
fn test_get_copy_answers_identically() {
    let frustum = transformed(Frustum::perspective(70.0, 1.3, 0.5, 60.0), &camera_at(1.0, 2.0, 3.0));
    let copy = frustum.get_copy();
    let samples = [
        (Vector3f::new(1.0, 2.0, -10.0), 0.0),
        (Vector3f::new(30.0, 2.0, -10.0), 0.0),
        (Vector3f::new(30.0, 2.0, -10.0), 25.0),
        (Vector3f::new(1.0, 2.0, 10.0), 1.0),
    ];
    for (point, radius) in samples {
        assert_eq!(frustum.in_view(&point, radius), copy.in_view(&point, radius));
        assert_eq!(frustum.test_sphere(&point, radius), copy.test_sphere(&point, radius));
    }
}

#[test]
fn test_get_copy_is_independent() {
    let frustum = transformed(Frustum::perspective(70.0, 1.3, 0.5, 60.0), &Frame::new());
    let before = *frustum.planes();

    let mut copy = frustum.get_copy();
    copy.set_orthographic(-5.0, 5.0, -5.0, 5.0, 0.0, 5.0);
    copy.transform(&camera_at(100.0, 0.0, 0.0));

    assert_eq!(*frustum.planes(), before);
    assert!(frustum.is_transformed());
    assert!(frustum.projection().is_perspective());
    assert_ne!(frustum, copy);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_classify_sphere() {
    let frustum = transformed(Frustum::new(), &Frame::new());
    assert_eq!(frustum.classify_sphere(&Vector3f::ZERO, 0.5), FrustumTest::Inside);
    assert_eq!(frustum.classify_sphere(&Vector3f::new(0.9, 0.0, 0.0), 0.5), FrustumTest::Partial);
    assert_eq!(frustum.classify_sphere(&Vector3f::new(3.0, 0.0, 0.0), 0.5), FrustumTest::Outside);
}

#[test]
fn test_classify_sphere_agrees_with_test_sphere() {
    let frustum = transformed(Frustum::perspective(60.0, 1.0, 1.0, 50.0), &camera_at(0.0, 0.0, 5.0));
    for x in -20..=20 {
        let center = Vector3f::new(x as f32, 0.5, -10.0);
        let visible = frustum.test_sphere(&center, 1.0);
        let class = frustum.classify_sphere(&center, 1.0);
        assert_eq!(visible, class != FrustumTest::Outside, "x = {}", x);
    }
}

#[test]
fn test_box_tests() {
    let frustum = transformed(Frustum::new(), &Frame::new());

    let inside = (Vector3f::splat(-0.5), Vector3f::splat(0.5));
    assert!(frustum.intersects_box(&inside.0, &inside.1));
    assert_eq!(frustum.classify_box(&inside.0, &inside.1), FrustumTest::Inside);

    let straddling = (Vector3f::new(0.5, -0.5, -0.5), Vector3f::new(2.0, 0.5, 0.5));
    assert!(frustum.intersects_box(&straddling.0, &straddling.1));
    assert_eq!(frustum.classify_box(&straddling.0, &straddling.1), FrustumTest::Partial);

    let outside = (Vector3f::new(2.0, 2.0, 2.0), Vector3f::new(3.0, 3.0, 3.0));
    assert!(!frustum.intersects_box(&outside.0, &outside.1));
    assert_eq!(frustum.classify_box(&outside.0, &outside.1), FrustumTest::Outside);

    let enclosing = (Vector3f::splat(-5.0), Vector3f::splat(5.0));
    assert!(frustum.intersects_box(&enclosing.0, &enclosing.1));
    assert_eq!(frustum.classify_box(&enclosing.0, &enclosing.1), FrustumTest::Partial);
}
