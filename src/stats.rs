//! Aggregates over number sequences.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("cannot compute {op} of an empty sequence")]
    EmptyInput { op: &'static str },
}

/// Compute the sum of all numbers, accumulating left to right from zero.
///
/// An empty sequence sums to `0.0`.
pub fn sum(numbers: &[f64]) -> f64 {
    let mut acc = 0.0;
    for &val in numbers {
        acc += val;
    }
    acc
}

/// Compute the arithmetic mean of the numbers.
///
/// # Errors
/// Returns [`StatsError::EmptyInput`] if `numbers` is empty.
pub fn average(numbers: &[f64]) -> Result<f64, StatsError> {
    if numbers.is_empty() {
        return Err(StatsError::EmptyInput { op: "average" });
    }
    Ok(sum(numbers) / numbers.len() as f64)
}

/// Find the largest number, keeping the earliest one on ties.
///
/// The first element seeds the running maximum and is only replaced by a
/// strictly greater element, so NaN elements after the first are skipped.
///
/// # Errors
/// Returns [`StatsError::EmptyInput`] if `numbers` is empty.
pub fn max(numbers: &[f64]) -> Result<f64, StatsError> {
    let (&first, rest) = numbers
        .split_first()
        .ok_or(StatsError::EmptyInput { op: "max" })?;
    Ok(rest
        .iter()
        .fold(first, |max, &val| if val > max { val } else { max }))
}
