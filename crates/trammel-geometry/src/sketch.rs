//! Control points plus the latest valid conic fitted to them.

use trammel_core::{Result, Tolerance};
use trammel_math::Point2;

use crate::conic::ConicModel;
use crate::points::{ControlPoint, ControlPoints};

/// Refits from scratch on every change and keeps the last valid model when
/// a refit fails.
#[derive(Debug, Clone)]
pub struct ConicSketch {
    points: ControlPoints,
    model: Option<ConicModel>,
    tolerance: Tolerance,
}

impl ConicSketch {
    /// Create a sketch and attempt the first fit. A failed first fit leaves
    /// the sketch without a model.
    pub fn new(points: ControlPoints, tolerance: Tolerance) -> Self {
        let model = match ConicModel::fit(points, tolerance) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("Initial fit rejected, no curve yet: {}", e);
                None
            }
        };
        Self {
            points,
            model,
            tolerance,
        }
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    /// The latest successfully fitted model, if any.
    pub fn model(&self) -> Option<&ConicModel> {
        self.model.as_ref()
    }

    /// Whether the displayed model matches the current points.
    pub fn is_current(&self) -> bool {
        self.model
            .as_ref()
            .is_some_and(|model| *model.points() == self.points)
    }

    /// Move one control point and refit.
    pub fn set_point(&mut self, which: ControlPoint, point: Point2) -> Result<&ConicModel> {
        self.points.set(which, point);
        self.refit()
    }

    /// Replace all control points and refit.
    pub fn set_points(&mut self, points: ControlPoints) -> Result<&ConicModel> {
        self.points = points;
        self.refit()
    }

    /// Refit from the current points. On failure the previous model stays.
    pub fn refit(&mut self) -> Result<&ConicModel> {
        match ConicModel::fit(self.points, self.tolerance) {
            Ok(model) => Ok(&*self.model.insert(model)),
            Err(e) => {
                log::warn!("Refit rejected, keeping previous curve: {}", e);
                Err(e)
            }
        }
    }
}
