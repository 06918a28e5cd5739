//! Conic through a tangent frame and one shape point.
//!
//! The apex `T` and side points `P1`, `P2` fix the two tangent lines `T-P1`
//! and `T-P2`; the conic touches them at `P1` and `P2`. In the UV frame of
//! `(T, P1, P2)` every such conic satisfies
//!
//! ```text
//! u * v + C * (u + v - 1)^2 = 0
//! ```
//!
//! and the shape point picks the constant `C`. Points on the curve are
//! rational blends `(r1 * P1 + 2 * T + r2 * P2) / (r1 + r2 + 2)` with
//! `r1 * r2 = -4 * C`.

use serde::{Deserialize, Serialize};
use trammel_core::{ConicError, Result, Tolerance, Validate};
use trammel_math::{CoordFrame, PlanarLine, Point2};

use crate::points::ControlPoints;

/// Lower end of the bounded parameter domain.
pub const MIN_T: f64 = 0.0;
/// Upper end of the bounded parameter domain.
pub const MAX_T: f64 = 1.0;

/// Sign family of the tangent weights, selected by the sign of `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightBranch {
    /// `C >= 0`: `w1 = 2 * sqrt(C)`, `w2 = -w1`.
    OppositeSigns,
    /// `C < 0`: `w1 = w2 = 2 * sqrt(-C)`.
    EqualSigns,
}

/// A fitted conic. Immutable; refit by building a new model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConicModel {
    points: ControlPoints,
    frame: CoordFrame,
    c: f64,
    w1: f64,
    w2: f64,
    tolerance: Tolerance,
}

impl ConicModel {
    /// Fit the conic to the four control points.
    ///
    /// Fails with `Degenerate` when apex and side points are collinear, and
    /// with `SingularExtra` when the shape point lies on line `P1-P2`.
    pub fn fit(points: ControlPoints, tolerance: Tolerance) -> Result<Self> {
        let frame = CoordFrame::new(points.apex, points.p1, points.p2, tolerance)?;

        let uv = frame.to_uv(points.extra);
        let denominator = uv.x + uv.y - 1.0;
        if tolerance.is_singular(denominator) {
            return Err(ConicError::SingularExtra { denominator });
        }
        let c = -(uv.x * uv.y) / (denominator * denominator);

        let (w1, w2) = if c >= 0.0 {
            let w = 2.0 * c.sqrt();
            (w, -w)
        } else {
            let w = 2.0 * (-c).sqrt();
            (w, w)
        };

        let model = Self {
            points,
            frame,
            c,
            w1,
            w2,
            tolerance,
        };
        model.validate()?;

        log::debug!(
            "Fitted conic: C = {}, w1 = {}, w2 = {}, {:?}",
            model.c,
            model.w1,
            model.w2,
            model.branch()
        );
        Ok(model)
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    pub fn frame(&self) -> &CoordFrame {
        &self.frame
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The shape constant `C`.
    pub fn shape_constant(&self) -> f64 {
        self.c
    }

    /// The tangent weights `(w1, w2)`.
    pub fn weights(&self) -> (f64, f64) {
        (self.w1, self.w2)
    }

    pub fn branch(&self) -> WeightBranch {
        if self.c >= 0.0 {
            WeightBranch::OppositeSigns
        } else {
            WeightBranch::EqualSigns
        }
    }

    /// Value of the implicit equation at `point`; zero on the conic.
    pub fn implicit_residual(&self, point: Point2) -> f64 {
        let uv = self.frame.to_uv(point);
        let s = uv.x + uv.y - 1.0;
        uv.x * uv.y + self.c * s * s
    }

    /// The implicit equation in plane coordinates, without the frame inverse:
    /// `l_u * l_v + C * l_s^2`, where `l_u`, `l_v` and `l_s` vanish on the
    /// lines `T-P2`, `T-P1` and `P1-P2`. Equals `det^2 * implicit_residual`.
    pub fn plane_residual(&self, point: Point2) -> f64 {
        let ControlPoints { apex, p1, p2, .. } = self.points;
        let l_u = PlanarLine::new(p2, apex).apply(point);
        let l_v = PlanarLine::new(apex, p1).apply(point);
        let l_s = PlanarLine::new(p2, p1).apply(point);
        l_u * l_v + self.c * l_s * l_s
    }

    /// Evaluate on the bounded domain `[MIN_T, MAX_T]`.
    ///
    /// Returns `P1` at `MIN_T` and `P2` at `MAX_T` exactly; the general
    /// formula divides by zero at both ends.
    pub fn evaluate(&self, t: f64) -> Result<Point2> {
        let tol = self.tolerance;
        if t < MIN_T - tol.parameter || t > MAX_T + tol.parameter || t.is_nan() {
            return Err(ConicError::OutOfDomain {
                t,
                min: MIN_T,
                max: MAX_T,
            });
        }

        if tol.parameter_eq(MAX_T, t) {
            return Ok(self.points.p2);
        }
        if tol.parameter_eq(t, MIN_T) {
            return Ok(self.points.p1);
        }

        let r1 = self.w1 * (t - MIN_T) / (MAX_T - t);
        let r2 = self.w2 * (MAX_T - t) / (t - MIN_T);
        self.blend(t, r1, r2)
    }

    /// Evaluate on the unbounded parameter `t != 0`, with `r1 = t` and
    /// `r2 = -4C / t`.
    ///
    /// Where the ratios are undefined (`t == 0` or `-4C / t` overflows) the
    /// limit point is returned: `P2`, or `T` when `C` is zero.
    pub fn evaluate_basic(&self, t: f64) -> Result<Point2> {
        match self.basic_ratios(t)? {
            Some((r1, r2)) => self.blend(t, r1, r2),
            None => Ok(self.limit_at_zero()),
        }
    }

    /// Parameter `t'` with `evaluate_basic(t') == evaluate(t)`, for `t` strictly
    /// inside the bounded domain. `None` at the endpoints or when `w1` is zero.
    pub fn basic_parameter_for(&self, t: f64) -> Option<f64> {
        let tol = self.tolerance;
        if t <= MIN_T + tol.parameter || t >= MAX_T - tol.parameter || tol.is_singular(self.w1) {
            return None;
        }
        Some(self.w1 * (t - MIN_T) / (MAX_T - t))
    }

    /// Ratios `(t, -4C / t)`, or `None` where they are undefined and only the
    /// `t -> 0` limit exists.
    pub(crate) fn basic_ratios(&self, t: f64) -> Result<Option<(f64, f64)>> {
        if t.is_nan() {
            return Err(ConicError::OutOfDomain {
                t,
                min: f64::NEG_INFINITY,
                max: f64::INFINITY,
            });
        }
        if t == 0.0 {
            return Ok(None);
        }
        let r2 = -4.0 * self.c / t;
        if !r2.is_finite() || !(t + r2 + 2.0).is_finite() {
            return Ok(None);
        }
        Ok(Some((t, r2)))
    }

    pub(crate) fn limit_at_zero(&self) -> Point2 {
        if self.c == 0.0 {
            self.points.apex
        } else {
            self.points.p2
        }
    }

    fn blend(&self, t: f64, r1: f64, r2: f64) -> Result<Point2> {
        let denominator = r1 + r2 + 2.0;
        if self.tolerance.is_singular(denominator) {
            return Err(ConicError::SingularParameter { t });
        }
        let ControlPoints { apex, p1, p2, .. } = self.points;
        Ok((r1 * p1 + 2.0 * apex + r2 * p2) / denominator)
    }
}

impl Validate for ConicModel {
    fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.w1.is_finite() && self.w2.is_finite()) {
            return Err(ConicError::InvalidModel(format!(
                "non-finite constants: C = {}, w1 = {}, w2 = {}",
                self.c, self.w1, self.w2
            )));
        }

        let identity = self.w1 * self.w2 + 4.0 * self.c;
        if identity.abs() > 1e-9 * self.c.abs().max(1.0) {
            return Err(ConicError::InvalidModel(format!(
                "w1 * w2 = {} does not match -4C = {}",
                self.w1 * self.w2,
                -4.0 * self.c
            )));
        }

        let signs_ok = match self.branch() {
            WeightBranch::OppositeSigns => self.w1 == -self.w2,
            WeightBranch::EqualSigns => self.w1 == self.w2,
        };
        if !signs_ok {
            return Err(ConicError::InvalidModel(format!(
                "weights ({}, {}) do not match {:?}",
                self.w1,
                self.w2,
                self.branch()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trammel_math::dvec2;

    fn equal_weight_points() -> ControlPoints {
        ControlPoints::new(
            dvec2(0.0, 0.0),
            dvec2(2.0, 0.0),
            dvec2(0.0, 2.0),
            dvec2(0.4, 0.4),
        )
    }

    fn opposite_weight_points() -> ControlPoints {
        // UV of extra = (-0.5, 0.5): C = 0.25
        ControlPoints::new(
            dvec2(0.0, 0.0),
            dvec2(2.0, 0.0),
            dvec2(0.0, 2.0),
            dvec2(-1.0, 1.0),
        )
    }

    #[test]
    fn test_fit_equal_signs() {
        let model = ConicModel::fit(equal_weight_points(), Tolerance::default()).unwrap();
        assert_abs_diff_eq!(model.shape_constant(), -1.0 / 9.0, epsilon = 1e-12);
        let (w1, w2) = model.weights();
        assert_abs_diff_eq!(w1, 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(w1, w2);
        assert_eq!(model.branch(), WeightBranch::EqualSigns);
    }

    #[test]
    fn test_fit_opposite_signs() {
        let model = ConicModel::fit(opposite_weight_points(), Tolerance::default()).unwrap();
        assert_abs_diff_eq!(model.shape_constant(), 0.25, epsilon = 1e-12);
        let (w1, w2) = model.weights();
        assert_abs_diff_eq!(w1, 1.0, epsilon = 1e-12);
        assert_eq!(w2, -w1);
        assert_eq!(model.branch(), WeightBranch::OppositeSigns);
    }

    #[test]
    fn test_shape_point_on_tangent_line_gives_zero_constant() {
        let points = ControlPoints {
            extra: dvec2(0.5, 0.0),
            ..equal_weight_points()
        };
        let model = ConicModel::fit(points, Tolerance::default()).unwrap();
        assert_eq!(model.shape_constant().abs(), 0.0);
        assert_eq!(model.branch(), WeightBranch::OppositeSigns);
        assert_eq!(model.evaluate_basic(0.0).unwrap(), points.apex);
    }

    #[test]
    fn test_extra_point_satisfies_implicit_equation() {
        for points in [equal_weight_points(), opposite_weight_points()] {
            let model = ConicModel::fit(points, Tolerance::default()).unwrap();
            assert!(model.implicit_residual(points.extra).abs() < 1e-12);
            assert!(model.implicit_residual(points.p1).abs() < 1e-12);
            assert!(model.implicit_residual(points.p2).abs() < 1e-12);
            assert!(model.implicit_residual(points.apex).abs() > 1e-3);
        }
    }

    #[test]
    fn test_plane_residual_scales_implicit_residual() {
        let model = ConicModel::fit(opposite_weight_points(), Tolerance::default()).unwrap();
        let det2 = model.frame().determinant().powi(2);
        for p in [dvec2(0.3, -1.2), dvec2(4.0, 4.0), dvec2(-2.5, 0.75)] {
            assert_abs_diff_eq!(
                model.plane_residual(p),
                det2 * model.implicit_residual(p),
                epsilon = 1e-9
            );
        }
        assert!(model.plane_residual(model.points().extra).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_endpoints_exact() {
        let points = equal_weight_points();
        let model = ConicModel::fit(points, Tolerance::default()).unwrap();
        assert_eq!(model.evaluate(MIN_T).unwrap(), points.p1);
        assert_eq!(model.evaluate(MAX_T).unwrap(), points.p2);
    }

    #[test]
    fn test_evaluate_out_of_domain() {
        let model = ConicModel::fit(equal_weight_points(), Tolerance::default()).unwrap();
        for t in [-0.5, 1.5, f64::NAN] {
            assert!(matches!(
                model.evaluate(t),
                Err(ConicError::OutOfDomain { .. })
            ));
        }
    }

    #[test]
    fn test_evaluate_interior_points_lie_on_conic() {
        let model = ConicModel::fit(equal_weight_points(), Tolerance::default()).unwrap();
        for i in 1..100 {
            let t = i as f64 / 100.0;
            let p = model.evaluate(t).unwrap();
            assert!(
                model.implicit_residual(p).abs() < 1e-10,
                "point at t={} off the conic",
                t
            );
        }
    }

    #[test]
    fn test_evaluate_basic_limit_at_zero() {
        let points = equal_weight_points();
        let model = ConicModel::fit(points, Tolerance::default()).unwrap();
        assert_eq!(model.evaluate_basic(0.0).unwrap(), points.p2);
        assert_eq!(model.evaluate_basic(-0.0).unwrap(), points.p2);
        // Tiny parameters still go through the formula and approach the limit
        let near = model.evaluate_basic(f64::EPSILON).unwrap();
        assert!((near - points.p2).length() < 1e-12);
        let near = model.evaluate_basic(1e-7).unwrap();
        assert!((near - points.p2).length() < 1e-5);
    }

    #[test]
    fn test_evaluate_basic_overflowing_ratio_is_limit() {
        let points = equal_weight_points();
        let model = ConicModel::fit(points, Tolerance::default()).unwrap();
        // -4C / t overflows to infinity
        assert_eq!(model.evaluate_basic(1e-310).unwrap(), points.p2);
        assert!(matches!(
            model.evaluate_basic(f64::NAN),
            Err(ConicError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_evaluate_basic_tiny_constant_is_not_clamped() {
        // C is about -2e-11, the same order as the small parameters below
        let points = ControlPoints {
            extra: dvec2(1.0, 2e-11),
            ..equal_weight_points()
        };
        let model = ConicModel::fit(points, Tolerance::default()).unwrap();
        let c = model.shape_constant();
        assert!(c < 0.0 && c.abs() < 1e-10);

        for t in [5e-10, 2e-9, 1e-8] {
            let p = model.evaluate_basic(t).unwrap();
            let r2 = -4.0 * c / t;
            let expected = (t * points.p1 + 2.0 * points.apex + r2 * points.p2) / (t + r2 + 2.0);
            assert!((p - expected).length() < 1e-12, "t={} gave {:?}", t, p);
            assert!((p - points.p2).length() > 1e-2, "t={} clamped to P2", t);
            assert!(model.implicit_residual(p).abs() < 1e-15);
        }
    }

    #[test]
    fn test_evaluate_basic_point_at_infinity() {
        // D = t - 1/t + 2 vanishes at t = sqrt(2) - 1
        let model = ConicModel::fit(opposite_weight_points(), Tolerance::default()).unwrap();
        let t = std::f64::consts::SQRT_2 - 1.0;
        assert!(matches!(
            model.evaluate_basic(t),
            Err(ConicError::SingularParameter { .. })
        ));
        // Nearby samples pass through with large magnitude
        let far = model.evaluate_basic(t + 1e-6).unwrap();
        assert!(far.is_finite());
        assert!(far.length() > 1e3);
    }

    #[test]
    fn test_basic_parameter_for_reparametrizes() {
        for points in [equal_weight_points(), opposite_weight_points()] {
            let model = ConicModel::fit(points, Tolerance::default()).unwrap();
            for t in [0.1, 0.25, 0.5, 0.8, 0.95] {
                let tb = model.basic_parameter_for(t).unwrap();
                let a = model.evaluate(t).unwrap();
                let b = model.evaluate_basic(tb).unwrap();
                assert!((a - b).length() < 1e-10, "mismatch at t={}", t);
            }
            assert!(model.basic_parameter_for(0.0).is_none());
            assert!(model.basic_parameter_for(1.0).is_none());
        }
    }

    #[test]
    fn test_validate_rejects_broken_identity() {
        let mut model = ConicModel::fit(equal_weight_points(), Tolerance::default()).unwrap();
        model.validate().unwrap();
        model.w2 = 1.0;
        assert!(matches!(model.validate(), Err(ConicError::InvalidModel(_))));
        model.w2 = f64::NAN;
        assert!(model.validate().is_err());
    }
}
