/// Tolerances for the conic kernel's singularity checks.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Bound below which a determinant or a formula denominator counts as zero
    pub singular: f64,
    /// Window around a curve parameter that selects an endpoint or removable case
    pub parameter: f64,
}

impl Tolerance {
    pub const DEFAULT_SINGULAR: f64 = 1e-12;
    pub const DEFAULT_PARAMETER: f64 = 1e-9;

    pub fn new(singular: f64, parameter: f64) -> Self {
        Self {
            singular,
            parameter,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            singular: Self::DEFAULT_SINGULAR,
            parameter: Self::DEFAULT_PARAMETER,
        }
    }

    pub fn loose() -> Self {
        Self {
            singular: 1e-8,
            parameter: 1e-6,
        }
    }

    pub fn tight() -> Self {
        Self {
            singular: 1e-15,
            parameter: 1e-12,
        }
    }

    /// Check if a determinant or denominator is zero within tolerance
    pub fn is_singular(self, v: f64) -> bool {
        v.abs() < self.singular
    }

    /// Check if two curve parameters coincide within tolerance
    pub fn parameter_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.parameter
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
