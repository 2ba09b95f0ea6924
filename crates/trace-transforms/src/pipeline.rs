//! Transform Pipeline.
//!
//! Runs a trace's transforms in declaration order, threading each stage's
//! bookkeeping into the next.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use trace_core::{
    error::{TransformError, TransformResult},
    points::compose_points_accessor,
    trace::Trace,
    traits::{StageOutcome, TraceTransform},
};

use crate::registry::build_transform;

/// Per-stage results of one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// One outcome per stage, in execution order.
    pub stages: Vec<StageOutcome>,
}

impl PipelineOutput {
    /// Original data indices behind final output position `index`.
    #[must_use]
    pub fn points_for(&self, index: usize) -> Vec<usize> {
        compose_points_accessor(&self.stages).points(index)
    }

    /// Length recorded by the last stage that rewrote the trace.
    #[must_use]
    pub fn final_length(&self) -> Option<usize> {
        self.stages.iter().rev().find_map(|stage| stage.length)
    }
}

/// Transform Pipeline.
///
/// Holds the transforms declared on a trace and applies them in order. Each
/// stage receives a points accessor composed from the outcomes of the stages
/// before it, so index provenance survives the whole chain.
///
/// # Example
///
/// ```ignore
/// let pipeline = TransformPipeline::new()
///     .add(PctChangeTransform::new(PctChangeOptions::new("y")))
///     .add_named("x_change".to_string(), PctChangeTransform::default());
///
/// let output = pipeline.run(&mut trace)?;
/// ```
pub struct TransformPipeline {
    transforms: Vec<Box<dyn TraceTransform>>,
    names: Vec<String>,
}

impl core::fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("num_transforms", &self.transforms.len())
            .field("names", &self.names)
            .finish()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Build a pipeline from transform specs.
    ///
    /// Specs with an unregistered `type` are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a spec is not an object or has no `type`.
    pub fn from_specs(specs: &[Value]) -> TransformResult<Self> {
        let mut pipeline = Self::new();

        for spec in specs {
            match build_transform(spec) {
                Ok(transform) => {
                    pipeline.names.push(transform.name().to_string());
                    pipeline.transforms.push(transform);
                }
                Err(TransformError::UnknownTransform(kind)) => {
                    warn!(transform = %kind, "unknown transform type, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(pipeline)
    }

    /// Build a pipeline from the trace's own `transforms` array.
    ///
    /// # Errors
    ///
    /// Returns an error if a spec is malformed.
    pub fn from_trace(trace: &Trace) -> TransformResult<Self> {
        Self::from_specs(&trace.transform_specs())
    }

    /// Add a transform to the pipeline under its own name.
    pub fn add<Tr>(mut self, transform: Tr) -> Self
    where
        Tr: TraceTransform + 'static,
    {
        self.names.push(transform.name().to_string());
        self.transforms.push(Box::new(transform));
        self
    }

    /// Add a transform with a custom name.
    pub fn add_named<Tr>(mut self, name: String, transform: Tr) -> Self
    where
        Tr: TraceTransform + 'static,
    {
        self.names.push(name);
        self.transforms.push(Box::new(transform));
        self
    }

    /// Get the number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Get transform names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Apply every transform to `trace` in order.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first collaborator error raised by a stage.
    pub fn run(&self, trace: &mut Trace) -> TransformResult<PipelineOutput> {
        let mut stages: Vec<StageOutcome> = Vec::with_capacity(self.transforms.len());

        for (name, transform) in self.names.iter().zip(&self.transforms) {
            let upstream = compose_points_accessor(&stages);
            let mut outcome = transform.calculate(trace, &upstream)?;
            outcome.name = name.clone();

            debug!(
                stage = %name,
                applied = outcome.is_applied(),
                length = ?outcome.length,
                "stage finished"
            );
            stages.push(outcome);
        }

        Ok(PipelineOutput { stages })
    }
}
