//! # Line-Mesh Geometry
//!
//! Segment intersection, surface normals, and AABB tests - the collision
//! primitives the terrain system is built from.
//!
//! ## Degeneracy policy
//!
//! A zero-length segment has no defined perpendicular. Rather than
//! propagating a numeric fault, it carries a **zero** surface normal and
//! reports no intersection against anything, matching the parallel-line
//! early return in [`Line::intersect`].

use crate::math::Vec2;

/// Numeric tolerance for parallel/degenerate tests.
pub const EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box: top-left corner plus width/height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Top-left corner in world space.
    pub position: Vec2,
    /// Width (x) and height (y); both non-negative.
    pub dimensions: Vec2,
}

impl Aabb {
    /// Creates a new box from its top-left corner and dimensions.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec2, dimensions: Vec2) -> Self {
        Self {
            position,
            dimensions,
        }
    }

    /// Minimum corner (top-left).
    #[inline]
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.position
    }

    /// Maximum corner (bottom-right).
    #[inline]
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.position + self.dimensions
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.dimensions * 0.5
    }

    /// Returns this box moved by `delta`.
    #[inline]
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.position + delta, self.dimensions)
    }

    /// Overlap test. Boxes that merely touch on an edge count as
    /// intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        !(a_min.x > b_max.x || a_max.x < b_min.x || a_min.y > b_max.y || a_max.y < b_min.y)
    }
}

/// A line segment with a derived unit surface normal.
///
/// The normal is the segment direction `b - a` rotated by -90 degrees and
/// normalized. Terrain meshes are wound left-to-right along increasing x,
/// which makes every normal point out of the solid ground (toward -y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// First endpoint.
    pub a: Vec2,
    /// Second endpoint.
    pub b: Vec2,
    /// Unit perpendicular, or [`Vec2::ZERO`] for a degenerate segment.
    pub surface_normal: Vec2,
}

impl Line {
    /// Constructs a segment and derives its surface normal.
    #[must_use]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        let surface_normal = (b - a).normalized().perp();
        Self {
            a,
            b,
            surface_normal,
        }
    }

    /// True for zero-length segments, which never intersect anything.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.surface_normal == Vec2::ZERO
    }

    /// Segment-segment intersection via the parametric (Cramer's rule)
    /// form.
    ///
    /// Returns the intersection point, or `None` when the segments are
    /// parallel (determinant within [`EPSILON`] of zero) or the crossing
    /// falls outside either segment. Parameter bounds are **inclusive**:
    /// exact endpoint contact counts as an intersection, which avoids
    /// tunneling at the moment of contact.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Vec2> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }

        let (x1, y1) = (self.a.x, self.a.y);
        let (x2, y2) = (self.b.x, self.b.y);
        let (x3, y3) = (other.a.x, other.a.y);
        let (x4, y4) = (other.b.x, other.b.y);

        let d = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if d.abs() < EPSILON {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / d;
        let u = ((x1 - x3) * (y1 - y2) - (y1 - y3) * (x1 - x2)) / d;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(Vec2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    }

    /// Tests this segment against the four boundary edges of `aabb`.
    ///
    /// Note: a segment lying entirely *inside* the box crosses no boundary
    /// and therefore does not intersect it. Terrain segments are long
    /// relative to entity boxes, so the boundary test is sufficient.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let min = aabb.min();
        let max = aabb.max();
        let top_right = Vec2::new(max.x, min.y);
        let bottom_left = Vec2::new(min.x, max.y);

        let edges = [
            Self::new(min, top_right),
            Self::new(top_right, max),
            Self::new(max, bottom_left),
            Self::new(bottom_left, min),
        ];

        edges.iter().any(|edge| self.intersect(edge).is_some())
    }
}

/// Connects consecutive points into segments (open polyline).
///
/// The terrain chunk feeds this its height profile plus two explicit
/// closing points (bottom-right, bottom-left) to seal the shape into a
/// solid region.
#[must_use]
pub fn line_mesh_from_points(points: &[Vec2]) -> Vec<Line> {
    points
        .windows(2)
        .map(|pair| Line::new(pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_normal_points_up() {
        // Flat ground segment, wound left to right.
        let line = Line::new(Vec2::new(0.0, 50.0), Vec2::new(10.0, 50.0));
        assert_eq!(line.surface_normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_surface_normal_unit_length_on_slope() {
        let line = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!((line.surface_normal.length() - 1.0).abs() < 1e-5);
        // Downhill-to-the-right slope: normal leans up and to the right.
        assert!(line.surface_normal.x > 0.0);
        assert!(line.surface_normal.y < 0.0);
    }

    #[test]
    fn test_crossing_segments_intersect_at_midpoint() {
        let a = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Line::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0));

        let point = a.intersect(&b).expect("segments cross");
        assert!((point.x - 5.0).abs() < 1e-4);
        assert!((point.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        let a = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let b = Line::new(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_non_overlapping_collinear_parameter_range() {
        // Crossing exists on the infinite lines but outside both segments.
        let a = Line::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Line::new(Vec2::new(10.0, 0.0), Vec2::new(11.0, -1.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_endpoint_contact_is_inclusive() {
        let a = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let b = Line::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, -10.0));
        assert!(a.intersect(&b).is_some());
    }

    #[test]
    fn test_degenerate_segment_zero_normal_no_intersection() {
        let point = Line::new(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
        let other = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(point.is_degenerate());
        assert_eq!(point.surface_normal, Vec2::ZERO);
        assert!(point.intersect(&other).is_none());
        assert!(!point.intersects_aabb(&Aabb::new(Vec2::ZERO, Vec2::splat(10.0))));
    }

    #[test]
    fn test_line_crosses_aabb_boundary() {
        let aabb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        let crossing = Line::new(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0));
        assert!(crossing.intersects_aabb(&aabb));

        let above = Line::new(Vec2::new(-5.0, -5.0), Vec2::new(15.0, -5.0));
        assert!(!above.intersects_aabb(&aabb));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let c = Aabb::new(Vec2::new(20.0, 20.0), Vec2::splat(5.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_mesh_from_points_segment_count() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, 2.0),
        ];
        let mesh = line_mesh_from_points(&points);

        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh[0].a, points[0]);
        assert_eq!(mesh[0].b, points[1]);
        assert_eq!(mesh[1].b, points[2]);
    }
}
