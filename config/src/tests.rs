//! # Tests for Config Constants

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_plane_epsilon_coarser_than_area_epsilon() {
    assert!(PLANE_EPSILON > DEGENERATE_AREA_EPSILON);
    assert!(DEGENERATE_AREA_EPSILON > 0.0);
}

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_segment_defaults_are_valid() {
    assert!(DEFAULT_RADIAL_SEGMENTS >= MIN_RADIAL_SEGMENTS);
    assert!(MIN_SPHERE_HEIGHT_SEGMENTS >= 2);
}

// =============================================================================
// CAMERA TESTS
// =============================================================================

#[test]
fn test_clip_planes_ordered() {
    assert!(DEFAULT_NEAR > 0.0);
    assert!(DEFAULT_FAR > DEFAULT_NEAR);
}

#[test]
fn test_orbit_limits_ordered() {
    assert!(MIN_POLAR_ANGLE < MAX_POLAR_ANGLE);
    assert!(MIN_ORBIT_DISTANCE < MAX_ORBIT_DISTANCE);
}

// =============================================================================
// CONTROL PANEL TESTS
// =============================================================================

#[test]
fn test_part_names_unique() {
    for (i, a) in PART_NAMES.iter().enumerate() {
        for b in &PART_NAMES[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_color_pickers_cover_four_groups() {
    let groups: Vec<&str> = COLOR_PICKERS.iter().map(|(_, group, _)| *group).collect();
    assert_eq!(groups, vec!["wall", "roof", "door", "window"]);
}
