//! Input validation for simulation runs.
//!
//! Checks process descriptors and run parameters before any engine
//! touches them. Detects:
//! - Non-positive or non-finite service times
//! - Negative or non-finite arrival times
//! - Fractional service times (Round Robin only)
//! - Non-positive quanta
//! - Empty process sets
//!
//! Every violation is reported, not just the first one.

use crate::models::ProcessSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes to schedule.
    EmptyProcessSet,
    /// `service_time <= 0`.
    NonPositiveServiceTime,
    /// `arrival_time < 0`.
    NegativeArrivalTime,
    /// A time is NaN or infinite.
    NonFiniteTime,
    /// Round Robin needs whole service units to reach completion.
    FractionalServiceTime,
    /// Quantum must be at least one tick.
    NonPositiveQuantum,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set for any run.
///
/// Checks:
/// 1. The set is non-empty
/// 2. All times are finite
/// 3. `arrival_time >= 0`
/// 4. `service_time > 0`
pub fn validate_processes(processes: &ProcessSet) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "No processes to schedule",
        ));
    }

    for p in processes {
        if !p.arrival_time.is_finite() || !p.service_time.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteTime,
                format!("Process {} has a non-finite time", p.index),
            ));
            continue;
        }
        if p.arrival_time < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrivalTime,
                format!(
                    "Process {} has negative arrival time {}",
                    p.index, p.arrival_time
                ),
            ));
        }
        if p.service_time <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveServiceTime,
                format!(
                    "Process {} has non-positive service time {}",
                    p.index, p.service_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a process set and quantum for a Round Robin run.
///
/// Adds to [`validate_processes`]:
/// 1. `quantum > 0`
/// 2. Every positive, finite service time is a whole number of ticks
pub fn validate_round_robin(processes: &ProcessSet, quantum: u64) -> ValidationResult {
    let mut errors = validate_processes(processes).err().unwrap_or_default();

    if let Err(e) = validate_quantum(quantum) {
        errors.extend(e);
    }

    for p in processes {
        if p.service_time.is_finite() && p.service_time > 0.0 && p.service_time.fract() != 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::FractionalServiceTime,
                format!(
                    "Process {} has fractional service time {} (RR runs whole ticks)",
                    p.index, p.service_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a Round Robin quantum.
pub fn validate_quantum(quantum: u64) -> ValidationResult {
    if quantum == 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            "Quantum must be a positive integer",
        )]);
    }
    Ok(())
}
