//! Point provenance across chained transforms.
//!
//! Every transform that rewrites a trace's arrays reports, for each output
//! position, which points of the original data it came from. Hover and
//! selection use the final map to find the user's data again.

use indexmap::IndexMap;

use crate::traits::StageOutcome;

/// Output position → original data positions, in output order.
pub type IndexToPoints = IndexMap<usize, Vec<usize>>;

/// Maps a stage's local output index back to original data indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PointsAccessor {
    /// No upstream stage reindexed the data: `i` maps to `[i]`.
    #[default]
    Identity,
    /// Lookup through the most recent upstream stage's index map.
    Composed(IndexToPoints),
}

impl PointsAccessor {
    /// Original data indices for local index `index`.
    ///
    /// Indices the upstream map does not know about resolve to an empty list.
    #[must_use]
    pub fn points(&self, index: usize) -> Vec<usize> {
        match self {
            Self::Identity => vec![index],
            Self::Composed(map) => map.get(&index).cloned().unwrap_or_default(),
        }
    }
}

/// Build the accessor a stage should use from the outcomes of the stages
/// that ran before it.
///
/// The last enabled stage that produced an index map wins; disabled stages
/// and stages without a map are transparent.
#[must_use]
pub fn compose_points_accessor(upstream: &[StageOutcome]) -> PointsAccessor {
    upstream
        .iter()
        .rev()
        .filter(|outcome| outcome.enabled)
        .find_map(|outcome| outcome.index_to_points.clone())
        .map_or(PointsAccessor::Identity, PointsAccessor::Composed)
}
