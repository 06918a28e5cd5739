pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{AnimationConfig, SamplingConfig, TrammelConfig};
pub use error::{ConicError, Result};
pub use tolerance::Tolerance;
pub use traits::Validate;
