//! Geometry helpers shared by every collision check
//!
//! All overlap tests are axis-aligned bounding boxes. Circles are treated as
//! their enclosing square, so corner hits on orbs are accepted as hits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unit vector in the direction of `v`, or zero when `v` has no length.
///
/// A zero result makes anything moving along it inert instead of NaN.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let length = v.length();
    if length != 0.0 { v / length } else { Vec2::ZERO }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored at its top-left corner
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict intersection: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Free-function form of [`Aabb::overlaps`]
#[inline]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_axis() {
        let n = normalize(Vec2::new(0.0, -7.5));
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::splat(5.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(boxes_overlap(&a, &b));
        assert!(boxes_overlap(&b, &a));
        assert!(!boxes_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let right = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let below = Aabb::from_pos_size(Vec2::new(0.0, 10.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(100.0));
        let inner = Aabb::from_pos_size(Vec2::splat(40.0), Vec2::splat(5.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit_and_parallel(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            let v = Vec2::new(x, y);
            prop_assume!(v.length() > 1e-3);
            let n = normalize(v);
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
            // Same direction: parallel and pointing the same way
            prop_assert!(n.perp_dot(v).abs() / v.length() < 1e-3);
            prop_assert!(n.dot(v) > 0.0);
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a = Aabb::from_pos_size(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::from_pos_size(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
