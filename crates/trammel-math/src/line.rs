use serde::{Deserialize, Serialize};

use crate::Point2;

/// Oriented line through two points, used as an implicit linear function.
///
/// `apply` is zero on the line, positive on the left of `p1 -> p2` and
/// negative on the right. It is not normalized: the value scales with the
/// distance between `p1` and `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarLine {
    pub p1: Point2,
    pub p2: Point2,
}

impl PlanarLine {
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Evaluate the line function at `point`.
    pub fn apply(&self, point: Point2) -> f64 {
        (self.p2 - self.p1).perp_dot(point - self.p1)
    }
}
