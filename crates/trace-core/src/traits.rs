//! Core trait definitions for trace transforms.
//!
//! A transform is one named stage of a trace's pipeline. It rewrites the
//! trace in place and hands its bookkeeping back to the orchestrator as a
//! [`StageOutcome`] instead of stashing it on shared options.

use serde::{Deserialize, Serialize};

use crate::error::TransformResult;
use crate::points::{IndexToPoints, PointsAccessor};
use crate::trace::Trace;

/// Bookkeeping produced by one stage for one calculation pass.
///
/// The orchestrator threads these into later stages (see
/// [`compose_points_accessor`](crate::points::compose_points_accessor)).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    /// Stage name.
    pub name: String,
    /// Whether the stage was enabled.
    pub enabled: bool,
    /// Output position → original points, when the stage rewrote data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_to_points: Option<IndexToPoints>,
    /// Length the stage recorded on the trace, when it rewrote data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl StageOutcome {
    /// Outcome of a stage that left the trace untouched.
    #[must_use]
    pub fn skipped(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            index_to_points: None,
            length: None,
        }
    }

    /// Whether the stage rewrote the trace.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.index_to_points.is_some()
    }
}

/// Core trait for chainable trace transforms.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use trace_core::{StageOutcome, Trace, TraceTransform, TransformResult};
/// use trace_core::points::PointsAccessor;
///
/// struct Noop;
///
/// impl TraceTransform for Noop {
///     fn name(&self) -> &str { "noop" }
///     fn is_enabled(&self) -> bool { true }
///     fn calculate(&self, _: &mut Trace, _: &PointsAccessor) -> TransformResult<StageOutcome> {
///         Ok(StageOutcome::skipped("noop", true))
///     }
/// }
/// ```
pub trait TraceTransform: Send + Sync {
    /// Registered type name of the transform.
    fn name(&self) -> &str;

    /// Whether the resolved options enable this stage.
    fn is_enabled(&self) -> bool;

    /// Rewrite `trace` in place.
    ///
    /// `upstream` maps this stage's input indices back to original data and
    /// is used to fill the outcome's index map.
    ///
    /// # Errors
    ///
    /// Only collaborator failures (malformed paths, unwritable fields) are
    /// reported; misconfiguration resolves to a skipped outcome.
    fn calculate(&self, trace: &mut Trace, upstream: &PointsAccessor)
        -> TransformResult<StageOutcome>;
}
