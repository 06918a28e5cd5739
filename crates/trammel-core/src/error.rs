use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConicError {
    #[error("Degenerate frame: apex and side points are collinear (det = {det:e})")]
    Degenerate { det: f64 },

    #[error("Singular shape point: it lies on the line through the side points (u + v - 1 = {denominator:e})")]
    SingularExtra { denominator: f64 },

    #[error("Singular parameter: curve point at t = {t} is at infinity")]
    SingularParameter { t: f64 },

    #[error("Parameter t = {t} outside of domain [{min}, {max}]")]
    OutOfDomain { t: f64, min: f64, max: f64 },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConicError>;
