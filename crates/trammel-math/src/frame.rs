use serde::{Deserialize, Serialize};
use trammel_core::{ConicError, Result, Tolerance};

use crate::{Mat2, Point2, Vector2};

/// Affine frame with origin at the apex `T` and basis `P1 - T`, `P2 - T`.
///
/// `to_uv` maps plane coordinates into the frame, `to_xy` maps back. In UV
/// space the apex is `(0, 0)`, `P1` is `(1, 0)` and `P2` is `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordFrame {
    origin: Point2,
    forward: Mat2,
    inverse: Mat2,
}

impl CoordFrame {
    /// Build the frame, failing with `Degenerate` when the three points are collinear.
    pub fn new(origin: Point2, basis_a: Point2, basis_b: Point2, tol: Tolerance) -> Result<Self> {
        let u_vec = basis_a - origin;
        let v_vec = basis_b - origin;
        let det = u_vec.x * v_vec.y - v_vec.x * u_vec.y;
        if tol.is_singular(det) || !det.is_finite() {
            return Err(ConicError::Degenerate { det });
        }

        let forward = Mat2::from_cols(u_vec, v_vec);
        // adjugate / det
        let inverse = Mat2::from_cols(
            Vector2::new(v_vec.y, -u_vec.y) / det,
            Vector2::new(-v_vec.x, u_vec.x) / det,
        );

        Ok(Self {
            origin,
            forward,
            inverse,
        })
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn forward(&self) -> Mat2 {
        self.forward
    }

    pub fn inverse(&self) -> Mat2 {
        self.inverse
    }

    pub fn determinant(&self) -> f64 {
        self.forward.determinant()
    }

    /// Plane coordinates to frame coordinates: `inverse * (point - T)`.
    pub fn to_uv(&self, point: Point2) -> Vector2 {
        self.inverse * (point - self.origin)
    }

    /// Frame coordinates to plane coordinates: `T + forward * uv`.
    pub fn to_xy(&self, uv: Vector2) -> Point2 {
        self.origin + self.forward * uv
    }
}
