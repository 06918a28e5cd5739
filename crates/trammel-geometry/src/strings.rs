//! Two-string (trammel) construction of the conic.
//!
//! Two strings anchored at the apex slide along `T-P1` and `T-P2`. At curve
//! parameter `t` they touch the side lines at `tangent_point1` and
//! `tangent_point2`; the segment between those two points touches the conic
//! at `curve_point`.

use serde::{Deserialize, Serialize};
use trammel_core::{AnimationConfig, ConicError, Result};
use trammel_math::Point2;

use crate::conic::ConicModel;
use crate::curve::Segment2;
use crate::points::ControlPoints;

/// One step of the string construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringFrame {
    pub t: f64,
    pub curve_point: Point2,
    pub tangent_point1: Point2,
    pub tangent_point2: Point2,
}

impl StringFrame {
    /// The segment joining the two tangent points.
    pub fn ratio_line(&self) -> Segment2 {
        Segment2::new(self.tangent_point1, self.tangent_point2)
    }
}

impl ConicModel {
    /// Evaluate the curve point and both string contact points at `t`, using
    /// the same ratios as `evaluate_basic`.
    pub fn evaluate_with_ratio_line(&self, t: f64) -> Result<StringFrame> {
        let tol = self.tolerance();
        let ControlPoints { apex, p1, p2, .. } = *self.points();

        let Some((r1, r2)) = self.basic_ratios(t)? else {
            // r1 -> 0 and r2 -> infinity
            let limit = self.limit_at_zero();
            return Ok(StringFrame {
                t,
                curve_point: limit,
                tangent_point1: apex,
                tangent_point2: limit,
            });
        };
        let denominator = r1 + r2 + 2.0;
        if tol.is_singular(denominator) {
            return Err(ConicError::SingularParameter { t });
        }
        let u_p = r1 / denominator;
        let v_p = r2 / denominator;
        let curve_point = apex + u_p * (p1 - apex) + v_p * (p2 - apex);

        let u1 = if tol.is_singular(r1 + 1.0) {
            0.0
        } else {
            1.0 - 1.0 / (r1 + 1.0)
        };
        let v2 = if tol.is_singular(r2 + 1.0) {
            0.0
        } else {
            1.0 - 1.0 / (r2 + 1.0)
        };

        Ok(StringFrame {
            t,
            curve_point,
            tangent_point1: apex + u1 * (p1 - apex),
            tangent_point2: apex + v2 * (p2 - apex),
        })
    }
}

/// Step scheduler for the string animation.
///
/// The host supplies the clock. `start` yields the first frame immediately;
/// `advance` yields one frame per elapsed `step_interval` until the countdown
/// runs out, then switches the auxiliary visuals off.
#[derive(Debug, Clone)]
pub struct StringAnimation {
    config: AnimationConfig,
    running: bool,
    visuals_enabled: bool,
    remaining: i64,
    last_step: f64,
}

impl StringAnimation {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            running: false,
            visuals_enabled: false,
            remaining: i64::from(config.total_steps),
            last_step: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the marker point and ratio line should be drawn.
    pub fn visuals_enabled(&self) -> bool {
        self.visuals_enabled
    }

    /// Steps left before the animation stops. Negative once finished.
    pub fn remaining_steps(&self) -> i64 {
        self.remaining
    }

    /// Start a run at clock time `now`. Returns `None` if already running.
    pub fn start(&mut self, model: &ConicModel, now: f64) -> Result<Option<StringFrame>> {
        if self.running {
            return Ok(None);
        }
        self.running = true;
        self.visuals_enabled = true;
        self.remaining = i64::from(self.config.total_steps);
        self.last_step = now;
        log::info!(
            "String animation started ({} steps)",
            self.config.total_steps
        );
        self.current_frame(model).map(Some)
    }

    /// Produce the next frame if at least `step_interval` has passed since the
    /// previous one.
    pub fn advance(&mut self, model: &ConicModel, now: f64) -> Result<Option<StringFrame>> {
        if !self.running || now - self.last_step < self.config.step_interval {
            return Ok(None);
        }
        self.last_step = now;

        let frame = self.current_frame(model)?;
        self.remaining -= 1;
        if self.remaining < 0 {
            self.stop();
        }
        Ok(Some(frame))
    }

    /// Stop immediately and hide the auxiliary visuals.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("String animation stopped");
        }
        self.running = false;
        self.visuals_enabled = false;
    }

    fn current_frame(&mut self, model: &ConicModel) -> Result<StringFrame> {
        let index = i64::from(self.config.total_steps) - self.remaining;
        let t = index as f64 + self.config.offset;
        match model.evaluate_with_ratio_line(t) {
            Ok(frame) => Ok(frame),
            Err(e) => {
                log::warn!("String animation aborted at t = {}: {}", t, e);
                self.stop();
                Err(e)
            }
        }
    }
}
