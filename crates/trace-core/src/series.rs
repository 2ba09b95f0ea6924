//! Numeric data series.
//!
//! The [`Series`] type is the owned, contiguous form of a trace data array
//! (`x`, `y`, `marker.size`, ...) once it has been pulled out of the trace.

use core::ops::Index;

use serde::{Deserialize, Serialize};

use crate::num::DataFloat;

/// A contiguous sequence of floating-point values.
///
/// # Example
///
/// ```rust
/// use trace_core::Series;
///
/// let mut series: Series<f64> = Series::new();
/// series.push(10.0);
/// series.push(20.0);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series[1], 20.0);
/// assert_eq!(series.as_slice(), &[10.0, 20.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound = "T: DataFloat")]
pub struct Series<T: DataFloat> {
    data: Vec<T>,
}

impl<T: DataFloat> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataFloat> Series<T> {
    /// Create a new empty series.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new series with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a series from an existing vector.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Returns the number of elements in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a value to the end of the series.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: DataFloat> Index<usize> for Series<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: DataFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
