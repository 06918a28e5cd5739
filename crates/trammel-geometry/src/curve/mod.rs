//! Planar curve trait and implementations.

mod branch;
mod segment;

use trammel_core::Result;
use trammel_math::Point2;

pub use branch::{BranchSide, ConicArc, ConicBranch};
pub use segment::Segment2;

/// Trait for parametric curves in the plane.
pub trait PlanarCurve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Fails where the curve point is at infinity or `t` is outside the domain.
    fn point_at(&self, t: f64) -> Result<Point2>;

    /// Return the parameter domain `(t_min, t_max)`. Either end may be infinite.
    fn domain(&self) -> (f64, f64);
}
