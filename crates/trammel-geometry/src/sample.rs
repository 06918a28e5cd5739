//! Sampling of curves into polylines.

use serde::{Deserialize, Serialize};
use trammel_core::{ConicError, Result, SamplingConfig};
use trammel_math::Point2;

use crate::conic::ConicModel;
use crate::curve::{BranchSide, ConicBranch, PlanarCurve};

/// Evaluate `curve` at `start + i * step` for `i` in `0..count`.
///
/// Samples whose curve point is at infinity are skipped; any other
/// evaluation error aborts the sampling.
pub fn sample_uniform(
    curve: &dyn PlanarCurve,
    start: f64,
    step: f64,
    count: usize,
) -> Result<Vec<Point2>> {
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let t = start + step * i as f64;
        match curve.point_at(t) {
            Ok(p) => points.push(p),
            Err(ConicError::SingularParameter { t }) => {
                log::debug!("Skipping sample at t = {}: point at infinity", t);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(points)
}

/// The two open branches of a conic as polylines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branches {
    /// Samples at `t = i * step + offset`
    pub positive: Vec<Point2>,
    /// Samples at `t = -(i * step + offset)`
    pub negative: Vec<Point2>,
}

impl Branches {
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Sample both branches of `evaluate_basic` symmetrically around `t = 0`.
pub fn sample_branches(model: &ConicModel, config: &SamplingConfig) -> Result<Branches> {
    let mut branches = Branches::default();
    for side in [BranchSide::Positive, BranchSide::Negative] {
        let sign = side.sign();
        let branch = ConicBranch::new(model, side);
        let points = sample_uniform(
            &branch,
            sign * config.offset,
            sign * config.step,
            config.samples_per_branch,
        )?;
        match side {
            BranchSide::Positive => branches.positive = points,
            BranchSide::Negative => branches.negative = points,
        }
    }
    Ok(branches)
}
