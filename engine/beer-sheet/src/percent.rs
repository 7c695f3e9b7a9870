//! Percentage cells such as "45%" or "12.5% (RB)"

use std::num::ParseFloatError;
use thiserror::Error;

/// Errors from [`parse_percent`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PercentError {
    #[error("percentage sign not found")]
    MalformedPercentage,

    #[error("invalid number before percentage sign: {0}")]
    NumberFormat(#[from] ParseFloatError),
}

/// Parse the number in front of the first `%` and return it as a fraction
///
/// Anything after the `%` is ignored.
pub fn parse_percent(cell: &str) -> Result<f64, PercentError> {
    let (number, _) = cell.split_once('%').ok_or(PercentError::MalformedPercentage)?;
    let percent: f64 = number.parse()?;
    Ok(percent / 100.0)
}
