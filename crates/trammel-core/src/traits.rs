use crate::error::Result;

/// Validate the internal consistency of a derived geometric entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
