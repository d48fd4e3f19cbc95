use glam::{Mat4, Quat, Vec3};
use super::*;

const EPSILON: f32 = 1e-5;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_points_empty_input_is_empty_box() {
    let aabb = AABB::from_points(std::iter::empty());
    assert_eq!(aabb, AABB::EMPTY);
    assert!(aabb.is_empty());
    assert!(!aabb.is_valid());
}

#[test]
fn test_from_points_folds_min_max() {
    let aabb = AABB::from_points([
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-4.0, 5.0, 0.5),
        Vec3::new(2.0, 0.0, -6.0),
    ]);
    assert_eq!(aabb.min, Vec3::new(-4.0, -2.0, -6.0));
    assert_eq!(aabb.max, Vec3::new(2.0, 5.0, 3.0));
}

#[test]
fn test_from_single_point_is_degenerate_but_valid() {
    let p = Vec3::new(3.0, 4.0, 5.0);
    let aabb = AABB::from_points([p]);
    assert_eq!(aabb.min, p);
    assert_eq!(aabb.max, p);
    assert!(aabb.is_valid());
    assert_eq!(aabb.radius(), 0.0);
}

#[test]
fn test_default_is_empty() {
    assert_eq!(AABB::default(), AABB::empty());
}

#[test]
fn test_from_center_half_extent() {
    let aabb = AABB::from_center_half_extent(Vec3::new(10.0, 0.0, -10.0), Vec3::splat(2.0));
    assert_eq!(aabb.min, Vec3::new(8.0, -2.0, -12.0));
    assert_eq!(aabb.max, Vec3::new(12.0, 2.0, -8.0));
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_with_empty_is_identity() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(AABB::EMPTY.merge(&aabb), aabb);
    assert_eq!(aabb.merge(&AABB::EMPTY), aabb);
}

#[test]
fn test_merge_disjoint_boxes() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::new(5.0, -3.0, 2.0), Vec3::new(6.0, -1.0, 3.0));
    let merged = a.merge(&b);
    assert_eq!(merged.min, Vec3::new(0.0, -3.0, 0.0));
    assert_eq!(merged.max, Vec3::new(6.0, 1.0, 3.0));
}

// ============================================================================
// Derived quantities
// ============================================================================

#[test]
fn test_center_dimensions_size_radius() {
    let aabb = AABB::new(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 6.0, 8.0));
    assert_eq!(aabb.center(), Vec3::new(0.0, 3.0, 6.0));
    assert_eq!(aabb.dimensions(), Vec3::new(2.0, 3.0, 2.0));
    assert_eq!(aabb.size(), Vec3::new(4.0, 6.0, 4.0));
    assert!((aabb.radius() - 17.0f32.sqrt()).abs() < EPSILON);
}

#[test]
fn test_non_finite_box_is_invalid() {
    let aabb = AABB::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE);
    assert!(!aabb.is_valid());

    let aabb = AABB::new(Vec3::ZERO, Vec3::new(1.0, f32::INFINITY, 1.0));
    assert!(!aabb.is_valid());
}

// ============================================================================
// Full-matrix transform
// ============================================================================

#[test]
fn test_transformed_translation_and_scale() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 3.0, 4.0),
        Quat::IDENTITY,
        Vec3::new(10.0, 0.0, -5.0),
    );
    let t = aabb.transformed(&m);
    assert!(approx(t.min, Vec3::new(8.0, -3.0, -9.0)));
    assert!(approx(t.max, Vec3::new(12.0, 3.0, -1.0)));
}

#[test]
fn test_transformed_negative_scale_reorders_corners() {
    let aabb = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
    let t = aabb.transformed(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    assert!(approx(t.min, Vec3::new(-2.0, 1.0, 1.0)));
    assert!(approx(t.max, Vec3::new(-1.0, 2.0, 2.0)));
}

#[test]
fn test_transformed_rotation_only_uses_two_corners() {
    // 90° about Z maps x -> y and y -> -x. Only min and max are transformed,
    // so the result is the box spanned by those two images.
    let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    let t = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    assert!(approx(t.min, Vec3::new(-1.0, 0.0, 0.0)));
    assert!(approx(t.max, Vec3::new(0.0, 2.0, 1.0)));
}

#[test]
fn test_transformed_projection_divides_by_w() {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let aabb = AABB::new(Vec3::new(-1.0, -2.0, -10.0), Vec3::new(3.0, 1.0, -5.0));

    let clip_min = projection * aabb.min.extend(1.0);
    let clip_max = projection * aabb.max.extend(1.0);
    // In front of the camera, w = -z: the divide is not a no-op
    assert!((clip_min.w - 10.0).abs() < EPSILON);
    assert!((clip_max.w - 5.0).abs() < EPSILON);

    let a = clip_min.truncate() / clip_min.w;
    let b = clip_max.truncate() / clip_max.w;
    let t = aabb.transformed(&projection);
    assert!(approx(t.min, a.min(b)));
    assert!(approx(t.max, a.max(b)));

    // Undivided clip coordinates would be several times larger
    assert!(!approx(t.max, clip_min.truncate().max(clip_max.truncate())));
    assert!(t.max.x <= 1.0 && t.min.x >= -1.0);
}

// ============================================================================
// GPU layout
// ============================================================================

#[test]
fn test_aabb_is_pod_for_debug_upload() {
    let regions = [
        AABB::new(Vec3::ZERO, Vec3::ONE),
        AABB::new(Vec3::splat(-1.0), Vec3::splat(3.0)),
    ];
    let bytes: &[u8] = bytemuck::cast_slice(&regions);
    assert_eq!(std::mem::size_of::<AABB>(), 24);
    assert_eq!(bytes.len(), 48);

    let floats: &[f32] = bytemuck::cast_slice(&regions);
    assert_eq!(&floats[6..12], &[-1.0, -1.0, -1.0, 3.0, 3.0, 3.0]);
}
