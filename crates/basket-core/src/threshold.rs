//! Range checks shared by configuration validation and the engine entry points.

use crate::error::{BasketError, Result};

/// Fail with [`BasketError::InvalidInput`] unless `value` lies in `[0, 1]`.
///
/// NaN is rejected.
pub fn ensure_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BasketError::invalid(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

/// Fail unless `value` is a finite, non-negative lift threshold.
pub fn ensure_min_lift(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BasketError::invalid(format!(
            "min_lift must be a finite value >= 0, got {value}"
        )))
    }
}
