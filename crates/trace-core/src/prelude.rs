//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits from trace-core.

// Core types
pub use crate::num::DataFloat;
pub use crate::path::{FieldPath, Segment};
pub use crate::series::Series;
pub use crate::trace::{resolve_target_array, FieldAccessor, SeriesAccessor, Target, Trace};

// Provenance
pub use crate::points::{compose_points_accessor, IndexToPoints, PointsAccessor};

// Error types
pub use crate::error::{PathError, TraceError, TraceResult, TransformError, TransformResult};

// Traits
pub use crate::traits::{StageOutcome, TraceTransform};
