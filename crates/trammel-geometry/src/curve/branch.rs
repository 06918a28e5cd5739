//! Curve views over a fitted conic.

use serde::{Deserialize, Serialize};
use trammel_core::{ConicError, Result};
use trammel_math::Point2;

use super::PlanarCurve;
use crate::conic::{ConicModel, MAX_T, MIN_T};

/// The bounded arc `evaluate(t)`, `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ConicArc<'a> {
    model: &'a ConicModel,
}

impl<'a> ConicArc<'a> {
    pub fn new(model: &'a ConicModel) -> Self {
        Self { model }
    }
}

impl PlanarCurve for ConicArc<'_> {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.model.evaluate(t)
    }

    fn domain(&self) -> (f64, f64) {
        (MIN_T, MAX_T)
    }
}

/// Which sign of the unbounded parameter a branch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchSide {
    Positive,
    Negative,
}

impl BranchSide {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// One open branch of `evaluate_basic(t)`, `t > 0` or `t < 0`.
#[derive(Debug, Clone, Copy)]
pub struct ConicBranch<'a> {
    model: &'a ConicModel,
    side: BranchSide,
}

impl<'a> ConicBranch<'a> {
    pub fn new(model: &'a ConicModel, side: BranchSide) -> Self {
        Self { model, side }
    }
}

impl PlanarCurve for ConicBranch<'_> {
    fn point_at(&self, t: f64) -> Result<Point2> {
        let (min, max) = self.domain();
        if t < min || t > max || t.is_nan() {
            return Err(ConicError::OutOfDomain { t, min, max });
        }
        self.model.evaluate_basic(t)
    }

    fn domain(&self) -> (f64, f64) {
        match self.side {
            BranchSide::Positive => (0.0, f64::INFINITY),
            BranchSide::Negative => (f64::NEG_INFINITY, 0.0),
        }
    }
}
