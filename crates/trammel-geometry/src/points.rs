//! The four defining points of a conic sketch.

use serde::{Deserialize, Serialize};
use trammel_math::Point2;

/// Selects one of the four control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPoint {
    Apex,
    P1,
    P2,
    Extra,
}

impl ControlPoint {
    pub const ALL: [ControlPoint; 4] = [Self::Apex, Self::P1, Self::P2, Self::Extra];
}

/// Apex `T`, side points `P1`/`P2` and the shape point.
///
/// The conic is tangent to `T-P1` at `P1` and to `T-P2` at `P2`, and passes
/// through `extra`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub apex: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub extra: Point2,
}

impl ControlPoints {
    pub fn new(apex: Point2, p1: Point2, p2: Point2, extra: Point2) -> Self {
        Self {
            apex,
            p1,
            p2,
            extra,
        }
    }

    pub fn get(&self, which: ControlPoint) -> Point2 {
        match which {
            ControlPoint::Apex => self.apex,
            ControlPoint::P1 => self.p1,
            ControlPoint::P2 => self.p2,
            ControlPoint::Extra => self.extra,
        }
    }

    pub fn set(&mut self, which: ControlPoint, point: Point2) {
        match which {
            ControlPoint::Apex => self.apex = point,
            ControlPoint::P1 => self.p1 = point,
            ControlPoint::P2 => self.p2 = point,
            ControlPoint::Extra => self.extra = point,
        }
    }
}
