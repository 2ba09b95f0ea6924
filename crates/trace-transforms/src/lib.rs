//! # trace-transforms
//!
//! Chainable chart-trace transforms for the trace-pipeline workspace.
//!
//! This crate provides:
//!
//! - `attributes`: declarative option schemas and default coercion
//! - `PctChangeTransform`: percent change against the first or previous point
//! - `registry`: transform lookup by the spec's `type` key
//! - `TransformPipeline`: runs a trace's transforms in order
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use trace_core::Trace;
//! use trace_transforms::prelude::*;
//!
//! let mut trace = Trace::from_value(json!({
//!     "x": [10.0, 20.0, 40.0],
//!     "transforms": [{"type": "pct_change", "calcType": "prev"}]
//! }))
//! .unwrap();
//!
//! let pipeline = TransformPipeline::from_trace(&trace).unwrap();
//! let output = pipeline.run(&mut trace).unwrap();
//!
//! assert_eq!(output.final_length(), Some(3));
//! assert_eq!(trace.fields()["x"], json!([0.0, 0.5, 0.5]));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod attributes;
mod pct_change;
mod pipeline;
pub mod registry;

pub mod prelude;

pub use attributes::{coerce, schema_json, AttributeDefault, AttributeSpec, ValType};
pub use pct_change::{
    pct_change_series, CalcType, PctChangeOptions, PctChangeTransform, PCT_CHANGE,
    PCT_CHANGE_ATTRIBUTES,
};
pub use pipeline::{PipelineOutput, TransformPipeline};
pub use registry::{build_transform, find_module, TransformModule, TRANSFORM_MODULES};
