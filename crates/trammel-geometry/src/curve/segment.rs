//! Line segment in the plane.

use serde::{Deserialize, Serialize};
use trammel_core::Result;
use trammel_math::{Point2, Vector2};

use super::PlanarCurve;

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    pub start: Point2,
    pub end: Point2,
}

impl Segment2 {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    /// Parameter of the orthogonal projection of `point` onto the carrier line.
    ///
    /// Unclamped: values outside `[0, 1]` fall beyond the endpoints.
    pub fn project_parameter(&self, point: Point2) -> f64 {
        let d = self.direction();
        let len2 = d.length_squared();
        if len2 == 0.0 {
            return 0.0;
        }
        (point - self.start).dot(d) / len2
    }

    /// Distance from `point` to the infinite line through the segment.
    pub fn line_distance(&self, point: Point2) -> f64 {
        let d = self.direction();
        let len = d.length();
        if len == 0.0 {
            return (point - self.start).length();
        }
        d.perp_dot(point - self.start).abs() / len
    }

    /// Distance from `point` to the segment itself.
    pub fn distance_to_point(&self, point: Point2) -> f64 {
        let t = self.project_parameter(point).clamp(0.0, 1.0);
        (point - self.start.lerp(self.end, t)).length()
    }
}

impl PlanarCurve for Segment2 {
    fn point_at(&self, t: f64) -> Result<Point2> {
        Ok(self.start + t * self.direction())
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
