// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use thiserror::Error;

/// Errors produced when building or combining geometric values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// The transform's determinant is too close to zero to invert.
    #[error("transform is not invertible (determinant {determinant})")]
    NotInvertible {
        /// The determinant of the rejected transform.
        determinant: f64,
    },
    /// A coordinate or coefficient was NaN or infinite.
    #[error("`{name}` must be finite, got {value}")]
    InvalidCoordinate {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A width, height or scale factor would produce a negative extent.
    #[error("`{name}` must be non-negative, got {value}")]
    NegativeSize {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A 3x3 matrix whose bottom row is not `[0, 0, 1]`.
    #[error("bottom row of an affine matrix must be [0, 0, 1]")]
    NotAffine,
}

/// Returns `value` if it is finite, naming it in the error otherwise.
pub fn finite(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::InvalidCoordinate { name, value })
    }
}

/// Returns `value` if it is finite and not negative.
pub fn non_negative(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    let value = finite(name, value)?;
    if value < 0.0 {
        Err(GeometryError::NegativeSize { name, value })
    } else {
        Ok(value)
    }
}

/// Returns `p` if both coordinates are finite.
pub fn finite_point(
    x_name: &'static str,
    y_name: &'static str,
    p: Point,
) -> Result<Point, GeometryError> {
    Ok(Point::new(finite(x_name, p.x)?, finite(y_name, p.y)?))
}
