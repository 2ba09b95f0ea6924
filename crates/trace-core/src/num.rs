//! Numeric type abstractions for trace data.
//!
//! This module defines the [`DataFloat`] trait which abstracts over `f32` and `f64`
//! so series kernels can be written once.

use num_traits::{Float, FromPrimitive, ToPrimitive};
use serde::{de::DeserializeOwned, Serialize};

/// Trait for floating-point types stored in trace data arrays.
///
/// # Associated Constants
///
/// - `NAN` - Not-a-number value
/// - `ZERO` - Zero value
///
/// # Example
///
/// ```rust
/// use trace_core::DataFloat;
///
/// fn relative_change<T: DataFloat>(current: T, baseline: T) -> T {
///     (current - baseline) / current
/// }
///
/// assert_eq!(relative_change(20.0f64, 10.0), 0.5);
/// ```
pub trait DataFloat:
    Float + FromPrimitive + ToPrimitive + Copy + Send + Sync + Default + Serialize + DeserializeOwned + 'static
{
    /// Not-a-number value.
    const NAN: Self;
    /// Zero value.
    const ZERO: Self;

    /// Convert from `f64`, rounding when the target type is narrower.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;

    /// Check if the value is finite (not NaN and not infinite).
    #[must_use]
    fn is_valid(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }
}

impl DataFloat for f32 {
    const NAN: Self = f32::NAN;
    const ZERO: Self = 0.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }
}

impl DataFloat for f64 {
    const NAN: Self = f64::NAN;
    const ZERO: Self = 0.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}
