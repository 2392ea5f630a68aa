use thiserror::Error;

/// Errors raised while configuring or running a simulation.
///
/// Numerical blow-up is deliberately absent: a `dt` violating the CFL
/// condition silently produces non-finite fields.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Inconsistent boundary pairing or invalid grid/physical parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An input array does not have the shape implied by the grid.
    #[error("Shape mismatch for {field}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn shape_mismatch(
        field: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            field,
            expected,
            actual,
        }
    }
}
