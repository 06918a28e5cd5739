//! Trammel geometry: the tangent-frame conic kernel and its curve views.

pub mod conic;
pub mod curve;
pub mod points;
pub mod sample;
pub mod sketch;
pub mod strings;

pub use conic::{ConicModel, WeightBranch, MAX_T, MIN_T};
pub use curve::{BranchSide, ConicArc, ConicBranch, PlanarCurve, Segment2};
pub use points::{ControlPoint, ControlPoints};
pub use sample::{sample_branches, sample_uniform, Branches};
pub use sketch::ConicSketch;
pub use strings::{StringAnimation, StringFrame};
