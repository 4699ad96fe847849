//! Crate-level error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the simulator.
///
/// Given validated input both engines are total, so everything here is
/// raised before a run starts or outside the scheduling core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("Could not parse '{token}' on line {line}.")]
    Parse { line: usize, token: String },
    #[error("Unexpected end of input: {0}.")]
    UnexpectedEof(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl SimulationError {
    /// Validation errors carried by an `InvalidInput`, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SimulationError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::InvalidInput(errors)
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(error: std::io::Error) -> Self {
        SimulationError::Io(error.to_string())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
