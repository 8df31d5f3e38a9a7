//! Error types for matrix operations.
//!
//! Every public entry point validates shapes up front and reports problems
//! through [`MatrixError`] instead of panicking, so a bad request never yields
//! a partial or corrupted result.

use std::fmt;

/// Errors that can occur during matrix operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible: inner dimensions disagree for a
    /// product, or the two operands of an elementwise op differ in shape.
    DimensionMismatch {
        /// Shape `(rows, cols)` of the left operand.
        left: (usize, usize),
        /// Shape `(rows, cols)` of the right operand.
        right: (usize, usize),
        /// Human-readable error message.
        message: String,
    },
    /// A Strassen-path operand is not square, the operands differ in
    /// dimension, or the dimension is not a power of two.
    ShapeError {
        /// Row count of the offending operand.
        rows: usize,
        /// Column count of the offending operand.
        cols: usize,
        /// Human-readable error message.
        message: String,
    },
    /// An invalid tuning parameter or argument.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch {
                left,
                right,
                message,
            } => write!(
                f,
                "Dimension mismatch: {} (left {}x{}, right {}x{})",
                message, left.0, left.1, right.0, right.1
            ),
            MatrixError::ShapeError {
                rows,
                cols,
                message,
            } => write!(f, "Shape error: {} (got {}x{})", message, rows, cols),
            MatrixError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Creates a dimension mismatch error.
pub fn dimension_mismatch(
    left: (usize, usize),
    right: (usize, usize),
    message: impl Into<String>,
) -> MatrixError {
    MatrixError::DimensionMismatch {
        left,
        right,
        message: message.into(),
    }
}

/// Creates a shape error.
pub fn shape_error(rows: usize, cols: usize, message: impl Into<String>) -> MatrixError {
    MatrixError::ShapeError {
        rows,
        cols,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> MatrixError {
    MatrixError::ValidationError {
        message: message.into(),
    }
}
