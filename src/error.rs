use core::fmt;

/// Errors raised while configuring or driving a [`crate::Model`].
///
/// Every variant maps onto one invariant class from the model's data
/// contract; a core operation either fully applies a segment or returns
/// one of these untouched (see `Model`'s segment operations).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelError {
    /// `pp_n2 <= 0` or `pp_he < 0` at compartment construction or
    /// `set_pressures` time.
    InvalidPressure { pp_he: f64, pp_n2: f64 },
    /// A half-time or M-value coefficient (`tau`, `a`, `b`) was `<= 0`.
    InvalidCoefficient { field: &'static str, value: f64 },
    /// `delta_t < 0`, a zero ascent/descent rate, or a non-finite
    /// intermediate result.
    ModelState { reason: &'static str },
    /// A post-deserialisation invariant check failed in `validate()`.
    ModelValidation { reason: &'static str },
    /// `pp_o2 > 3.0` bar under `Config::strict_o2_limits`.
    InvalidO2Exposure { pp_o2: f64 },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ModelError::InvalidPressure { pp_he, pp_n2 } => write!(
                f,
                "invalid inert-gas pressures: pp_he={pp_he}, pp_n2={pp_n2} (pp_n2 must be > 0, pp_he must be >= 0)"
            ),
            ModelError::InvalidCoefficient { field, value } => {
                write!(f, "invalid coefficient {field}={value} (must be > 0)")
            }
            ModelError::ModelState { reason } => write!(f, "invalid model state: {reason}"),
            ModelError::ModelValidation { reason } => write!(f, "model validation failed: {reason}"),
            ModelError::InvalidO2Exposure { pp_o2 } => {
                write!(f, "pp_o2 {pp_o2} bar exceeds the 3.0 bar strict O2 exposure limit")
            }
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for ModelError {}

/// Error returned from [`crate::Config`] validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationErr {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ConfigValidationErr {
    pub(crate) fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ConfigValidationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config field '{}': {}", self.field, self.reason)
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for ConfigValidationErr {}
