//! # trace-core
//!
//! Core types and traits for chart-trace transforms.
//!
//! This crate provides the foundational abstractions used by every transform:
//!
//! - [`DataFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] - Owned numeric data array
//! - [`FieldPath`] - Parsed dotted path into a trace (`marker.size`, `a[0].b`)
//! - [`Trace`] - Trace record with typed [`SeriesAccessor`] access
//! - [`PointsAccessor`] - Point provenance composed across chained transforms
//! - [`TraceTransform`] - Chainable transform stage trait
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use trace_core::prelude::*;
//!
//! let mut trace = Trace::from_value(json!({"y": [10.0, 20.0]})).unwrap();
//! let path = FieldPath::parse("y").unwrap();
//!
//! let mut accessor = trace.accessor(&path);
//! let values = accessor.get().unwrap();
//! accessor.set(values.iter().map(|v| v * 2.0).collect()).unwrap();
//!
//! assert_eq!(trace.field(&path), Some(&json!([20.0, 40.0])));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod num;
pub mod path;
pub mod points;
pub mod prelude;
pub mod series;
pub mod trace;
pub mod traits;

// Re-export core types at crate root
pub use error::{PathError, TraceError, TraceResult, TransformError, TransformResult};
pub use num::DataFloat;
pub use path::FieldPath;
pub use points::{compose_points_accessor, IndexToPoints, PointsAccessor};
pub use series::Series;
pub use trace::{resolve_target_array, FieldAccessor, SeriesAccessor, Target, Trace};
pub use traits::{StageOutcome, TraceTransform};
