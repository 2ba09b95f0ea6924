//! Percent Change Transform.
//!
//! Rewrites a trace data array as relative changes against either the first
//! point or the preceding point.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use trace_core::{
    error::TransformResult,
    num::DataFloat,
    path::FieldPath,
    points::{IndexToPoints, PointsAccessor},
    series::Series,
    trace::{resolve_target_array, series_from_value, SeriesAccessor, Target, Trace},
    traits::{StageOutcome, TraceTransform},
};

use crate::attributes::{coerce, AttributeDefault, AttributeSpec, ValType};

/// Registered type name.
pub const PCT_CHANGE: &str = "pct_change";

const ENABLED: AttributeSpec = AttributeSpec {
    name: "enabled",
    val_type: ValType::Boolean,
    default: AttributeDefault::Bool(true),
    strict: false,
    no_blank: false,
    array_ok: false,
    description: "Determines whether this pct_change transform is enabled or disabled.",
};

const TARGET: AttributeSpec = AttributeSpec {
    name: "target",
    val_type: ValType::String,
    default: AttributeDefault::Str("x"),
    strict: true,
    no_blank: true,
    array_ok: true,
    description: "Sets the target by which the pct_change transform is applied. \
        If a string, *target* is assumed to be a reference to a data array in the parent trace object. \
        To pct_change about nested variables, use *.* to access them. \
        For example, set `target` to *marker.size* to pct_change about the marker size array. \
        If an array, *target* is then the data array by which the pct_change transform is applied.",
};

const CALC_TYPE: AttributeSpec = AttributeSpec {
    name: "calcType",
    val_type: ValType::String,
    default: AttributeDefault::Str("first"),
    strict: true,
    no_blank: true,
    array_ok: true,
    description: "first or prev",
};

/// Option schema of the pct_change transform.
pub const PCT_CHANGE_ATTRIBUTES: &[AttributeSpec] = &[ENABLED, TARGET, CALC_TYPE];

/// Baseline policy.
///
/// Values other than `first` and `prev` are kept verbatim and behave like
/// `first` when calculating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CalcType {
    /// Change relative to the first point.
    #[default]
    First,
    /// Change relative to the preceding point.
    Prev,
    /// Unrecognized policy.
    Other(String),
}

impl CalcType {
    /// Index of the point that output position `j` is compared against.
    #[must_use]
    pub fn baseline(&self, j: usize) -> usize {
        match self {
            Self::Prev => j.saturating_sub(1),
            Self::First | Self::Other(_) => 0,
        }
    }

    /// The policy name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for CalcType {
    fn from(value: &str) -> Self {
        match value {
            "first" => Self::First,
            "prev" => Self::Prev,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CalcType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CalcType> for String {
    fn from(value: CalcType) -> Self {
        value.as_str().to_string()
    }
}

/// Resolved options for PctChangeTransform.
///
/// Disabled options carry no `target` or `calc_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PctChangeOptions {
    /// Whether the transform runs.
    pub enabled: bool,
    /// Data array to rewrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Baseline policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_type: Option<CalcType>,
}

impl Default for PctChangeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            target: Some(Target::default()),
            calc_type: Some(CalcType::First),
        }
    }
}

impl PctChangeOptions {
    /// Create enabled options for a specific target path.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: Some(Target::Path(target.into())),
            ..Self::default()
        }
    }

    /// Create options that skip the transform.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            target: None,
            calc_type: None,
        }
    }

    /// Set the baseline policy.
    #[must_use]
    pub fn with_calc_type(mut self, calc_type: CalcType) -> Self {
        self.calc_type = Some(calc_type);
        self
    }

    /// Use literal data instead of a trace field.
    #[must_use]
    pub fn with_target_array(mut self, values: Series<f64>) -> Self {
        self.target = Some(Target::Array(values));
        self
    }

    /// Resolve raw user options against [`PCT_CHANGE_ATTRIBUTES`].
    ///
    /// `target` and `calcType` are only resolved when the transform is
    /// enabled. The raw value is never modified; a non-object resolves to
    /// the defaults.
    #[must_use]
    pub fn resolve_defaults(raw: &Value) -> Self {
        let empty = Map::new();
        let raw = raw.as_object().unwrap_or(&empty);

        let enabled = coerce(raw, &ENABLED).as_bool().unwrap_or(true);
        if !enabled {
            return Self::disabled();
        }

        let target = match coerce(raw, &TARGET) {
            Value::String(path) => Target::Path(path),
            array @ Value::Array(_) => {
                Target::Array(series_from_value(&array).unwrap_or_default())
            }
            _ => Target::default(),
        };

        let calc_type = match coerce(raw, &CALC_TYPE) {
            Value::String(name) => CalcType::from(name),
            Value::Array(items) => CalcType::Other(Value::Array(items).to_string()),
            _ => CalcType::First,
        };

        Self {
            enabled,
            target: Some(target),
            calc_type: Some(calc_type),
        }
    }
}

/// Percent change of the first `len` points of `source`.
///
/// `out[0] = 0` and `out[j] = (source[j] - source[b]) / source[j]` where `b`
/// is the baseline chosen by `calc_type`. Division follows IEEE semantics.
///
/// # Example
///
/// ```rust
/// use trace_transforms::{pct_change_series, CalcType};
///
/// let out = pct_change_series(&[10.0, 20.0, 40.0], &CalcType::Prev, 3);
/// assert_eq!(out.as_slice(), &[0.0, 0.5, 0.5]);
/// ```
#[must_use]
pub fn pct_change_series<T: DataFloat>(source: &[T], calc_type: &CalcType, len: usize) -> Series<T> {
    let len = len.min(source.len());
    let mut result = Series::with_capacity(len);

    if len == 0 {
        return result;
    }

    result.push(T::ZERO);
    for j in 1..len {
        let baseline = source[calc_type.baseline(j)];
        result.push((source[j] - baseline) / source[j]);
    }

    result
}

/// Percent Change Transform.
///
/// # Steps
///
/// 1. Skip when disabled or when the target array is missing or empty.
/// 2. `len` = target length, capped by the trace's length hint.
/// 3. Replace the target field with [`pct_change_series`].
/// 4. Map every output position through the upstream points accessor.
/// 5. Record `len` as the trace length.
///
/// Literal-array targets have no field to write back to; the trace keeps its
/// arrays and only the length and index map are updated.
#[derive(Debug, Clone, Default)]
pub struct PctChangeTransform {
    options: PctChangeOptions,
}

impl PctChangeTransform {
    /// Create a new PctChangeTransform with resolved options.
    pub fn new(options: PctChangeOptions) -> Self {
        Self { options }
    }

    /// Create a transform from raw user options.
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        Self::new(PctChangeOptions::resolve_defaults(raw))
    }

    /// Resolved options.
    #[must_use]
    pub fn options(&self) -> &PctChangeOptions {
        &self.options
    }

    /// Output positions that map onto source positions.
    ///
    /// The transform neither reorders nor filters, so this is `0..len`.
    fn positions(len: usize) -> impl Iterator<Item = usize> {
        0..len
    }
}

impl TraceTransform for PctChangeTransform {
    fn name(&self) -> &str {
        PCT_CHANGE
    }

    fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    fn calculate(&self, trace: &mut Trace, upstream: &PointsAccessor) -> TransformResult<StageOutcome> {
        if !self.options.enabled {
            debug!(transform = PCT_CHANGE, "transform disabled, skipping");
            return Ok(StageOutcome::skipped(PCT_CHANGE, false));
        }

        let (target, calc_type) = match (&self.options.target, &self.options.calc_type) {
            (Some(target), Some(calc_type)) => (target, calc_type),
            _ => {
                debug!(
                    transform = PCT_CHANGE,
                    "options not resolved (no target or calcType), skipping"
                );
                return Ok(StageOutcome::skipped(PCT_CHANGE, true));
            }
        };

        let source = match resolve_target_array(trace, target)? {
            Some(source) if !source.is_empty() => source,
            _ => {
                debug!(
                    transform = PCT_CHANGE,
                    path = target.as_path().unwrap_or("<array>"),
                    "target array not found, skipping"
                );
                return Ok(StageOutcome::skipped(PCT_CHANGE, true));
            }
        };

        // A zero length hint means "unset".
        let len = match trace.length() {
            Some(hint) if hint > 0 => source.len().min(hint),
            _ => source.len(),
        };

        let output = pct_change_series(source.as_slice(), calc_type, len);

        if let Target::Path(path) = target {
            let path = FieldPath::parse(path)?;
            trace.accessor(&path).set(output)?;
        }

        let index_to_points: IndexToPoints = Self::positions(len)
            .map(|i| (i, upstream.points(i)))
            .collect();

        trace.set_length(len);

        trace!(
            transform = PCT_CHANGE,
            len,
            calc_type = calc_type.as_str(),
            "pct_change applied"
        );

        Ok(StageOutcome {
            name: PCT_CHANGE.to_string(),
            enabled: true,
            index_to_points: Some(index_to_points),
            length: Some(len),
        })
    }
}
