pub mod frame;
pub mod line;

pub use glam::{dvec2, DMat2, DVec2};
pub use frame::CoordFrame;
pub use line::PlanarLine;

pub type Point2 = DVec2;
pub type Vector2 = DVec2;
pub type Mat2 = DMat2;
