//! Prelude for trace-transforms.
//!
//! This module re-exports all commonly used types and traits.

pub use crate::attributes::{AttributeSpec, ValType};
pub use crate::pct_change::{
    pct_change_series, CalcType, PctChangeOptions, PctChangeTransform, PCT_CHANGE,
};
pub use crate::pipeline::{PipelineOutput, TransformPipeline};
pub use crate::registry::{build_transform, find_module};

// Re-export core transform trait
pub use trace_core::traits::{StageOutcome, TraceTransform};
