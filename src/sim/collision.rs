//! Collision geometry
//!
//! Helicopters collide as rectangles rotated to face their heading. Overlap is
//! decided with the separating axis test for convex polygons: two convex shapes
//! are disjoint iff their projections are disjoint on some edge normal.

use glam::Vec2;

/// Rectangle rotated about a pivot
///
/// Unrotated, the rectangle spans `position .. position + size`. It is then
/// rotated by `rotation_deg` around `position + origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRect {
    pub size: Vec2,
    pub position: Vec2,
    /// Pivot relative to `position`
    pub origin: Vec2,
    pub rotation_deg: f32,
}

impl CollisionRect {
    /// Rectangle at the origin, pivoting around its centre
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            position: Vec2::ZERO,
            origin: size / 2.0,
            rotation_deg: 0.0,
        }
    }

    /// Resize, keeping the pivot at the centre
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.origin = size / 2.0;
    }

    pub fn set_transform(&mut self, position: Vec2, rotation_deg: f32) {
        self.position = position;
        self.rotation_deg = rotation_deg;
    }

    /// Corners in arena space, counter-clockwise before rotation
    pub fn vertices(&self) -> [Vec2; 4] {
        let local = [
            Vec2::ZERO,
            Vec2::new(self.size.x, 0.0),
            self.size,
            Vec2::new(0.0, self.size.y),
        ];
        let rotation = Vec2::from_angle(self.rotation_deg.to_radians());
        local.map(|corner| rotation.rotate(corner - self.origin) + self.origin + self.position)
    }

    /// Whether the two rectangles overlap. Touching edges count.
    pub fn overlaps(&self, other: &CollisionRect) -> bool {
        convex_polygons_overlap(&self.vertices(), &other.vertices())
    }
}

/// Min/max of the polygon projected onto `axis`
fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    polygon
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

/// Separating axis test for two convex polygons given as ordered vertex lists
pub fn convex_polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    for polygon in [a, b] {
        let n = polygon.len();
        for i in 0..n {
            let edge = polygon[(i + 1) % n] - polygon[i];
            let axis = edge.perp();
            // Degenerate edge, no normal to test
            if axis.length_squared() <= f32::EPSILON * f32::EPSILON {
                continue;
            }

            let (a_min, a_max) = project(a, axis);
            let (b_min, b_max) = project(b, axis);
            if a_max < b_min || b_max < a_min {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32, rot: f32) -> CollisionRect {
        let mut r = CollisionRect::new(Vec2::new(w, h));
        r.set_transform(Vec2::new(x, y), rot);
        r
    }

    #[test]
    fn test_vertices_unrotated() {
        let r = rect(10.0, 20.0, 4.0, 2.0, 0.0);
        assert_eq!(
            r.vertices(),
            [
                Vec2::new(10.0, 20.0),
                Vec2::new(14.0, 20.0),
                Vec2::new(14.0, 22.0),
                Vec2::new(10.0, 22.0),
            ]
        );
    }

    #[test]
    fn test_vertices_rotate_about_centre() {
        // A 4x2 box turned a quarter becomes a 2x4 box with the same centre
        let r = rect(0.0, 0.0, 4.0, 2.0, 90.0);
        let verts = r.vertices();
        let min = verts.iter().fold(Vec2::splat(f32::INFINITY), |m, v| m.min(*v));
        let max = verts.iter().fold(Vec2::splat(f32::NEG_INFINITY), |m, v| m.max(*v));
        assert!((min - Vec2::new(1.0, -1.0)).length() < 1e-5);
        assert!((max - Vec2::new(3.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_half_turn_is_same_footprint() {
        let a = rect(5.0, 5.0, 6.0, 2.0, 0.0);
        let b = rect(5.0, 5.0, 6.0, 2.0, 180.0);
        let mut va = a.vertices().map(|v| (v.x.round() as i32, v.y.round() as i32));
        let mut vb = b.vertices().map(|v| (v.x.round() as i32, v.y.round() as i32));
        va.sort();
        vb.sort();
        assert_eq!(va, vb);
    }

    #[test]
    fn test_overlap_axis_aligned() {
        let a = rect(0.0, 0.0, 10.0, 10.0, 0.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0, 0.0)));
        assert!(a.overlaps(&rect(10.0, 0.0, 10.0, 10.0, 0.0)), "touching counts");
        assert!(!a.overlaps(&rect(10.5, 0.0, 10.0, 10.0, 0.0)));
        assert!(!a.overlaps(&rect(0.0, -11.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_rotation_opens_a_gap() {
        // Long thin bars side by side; bounding boxes overlap but rotated bars don't
        let a = rect(0.0, 0.0, 20.0, 2.0, 45.0);
        let b = rect(4.0, -4.0, 20.0, 2.0, 45.0);
        assert!(!a.overlaps(&b));
        // The same bars unrotated do overlap along x
        let a = rect(0.0, 0.0, 20.0, 2.0, 0.0);
        let b = rect(4.0, 1.0, 20.0, 2.0, 0.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_empty_polygon_never_overlaps() {
        let square = rect(0.0, 0.0, 1.0, 1.0, 0.0).vertices();
        assert!(!convex_polygons_overlap(&[], &square));
        assert!(!convex_polygons_overlap(&square, &[]));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, ar in 0.0f32..360.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, br in 0.0f32..360.0,
            w in 1.0f32..60.0, h in 1.0f32..60.0,
        ) {
            let a = rect(ax, ay, w, h, ar);
            let b = rect(bx, by, w, h, br);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(
            x in -100.0f32..100.0, y in -100.0f32..100.0, r in 0.0f32..360.0,
            w in 1.0f32..60.0, h in 1.0f32..60.0,
        ) {
            let a = rect(x, y, w, h, r);
            prop_assert!(a.overlaps(&a));
        }
    }
}
