//! The trace record and typed access to its data arrays.
//!
//! A [`Trace`] is an open JSON object (`x`, `y`, `marker`, `transforms`, ...)
//! plus the `_length` hint that transforms use to agree on how many leading
//! points are valid. Transforms never walk the JSON themselves: they build a
//! [`FieldAccessor`] from a parsed [`FieldPath`] and read or replace a whole
//! [`Series`] through the [`SeriesAccessor`] trait.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{PathError, TraceError, TraceResult};
use crate::num::DataFloat;
use crate::path::{FieldPath, Segment};
use crate::series::Series;

/// The data array a transform operates on.
///
/// Serialized untagged: a JSON string is a field path, a JSON array is the
/// data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Dotted path to an array inside the trace.
    Path(String),
    /// Literal data supplied with the transform options.
    Array(Series<f64>),
}

impl Default for Target {
    fn default() -> Self {
        Self::Path("x".to_string())
    }
}

impl Target {
    /// The field path, for path targets.
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Array(_) => None,
        }
    }
}

/// A single chart data series with its attributes.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use trace_core::Trace;
///
/// let trace = Trace::from_value(json!({"x": [1, 2, 3], "_length": 2})).unwrap();
/// assert_eq!(trace.length(), Some(2));
/// assert!(trace.fields().contains_key("x"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "_length", default, skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trace from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or `_length` is not a
    /// non-negative integer.
    pub fn from_value(value: Value) -> TraceResult<Self> {
        if !value.is_object() {
            return Err(TraceError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Convert the trace back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn into_value(self) -> TraceResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Attribute map, excluding the `_length` hint.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Insert or replace a top-level attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Number of leading points every transform should treat as valid.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Record a new authoritative length.
    pub fn set_length(&mut self, length: usize) {
        self.length = Some(length);
    }

    /// Look up the value at `path`, if every step along it exists.
    #[must_use]
    pub fn field(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = match first {
            Segment::Key(key) => self.fields.get(key)?,
            Segment::Index(_) => return None,
        };
        for segment in rest {
            current = match segment {
                Segment::Key(key) => current.get(key.as_str())?,
                Segment::Index(index) => current.get(*index)?,
            };
        }
        Some(current)
    }

    /// Transform specs declared on the trace under `transforms`.
    #[must_use]
    pub fn transform_specs(&self) -> Vec<Value> {
        self.fields
            .get("transforms")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Build a read/write accessor for the array at `path`.
    pub fn accessor<'a>(&'a mut self, path: &'a FieldPath) -> FieldAccessor<'a> {
        FieldAccessor { trace: self, path }
    }
}

/// Read/replace access to one numeric array.
pub trait SeriesAccessor {
    /// Current contents, or `None` when the location does not hold an array.
    fn get(&self) -> Option<Series<f64>>;

    /// Replace the contents entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be created.
    fn set(&mut self, values: Series<f64>) -> TraceResult<()>;
}

/// [`SeriesAccessor`] bound to a field path of a [`Trace`].
#[derive(Debug)]
pub struct FieldAccessor<'a> {
    trace: &'a mut Trace,
    path: &'a FieldPath,
}

impl SeriesAccessor for FieldAccessor<'_> {
    fn get(&self) -> Option<Series<f64>> {
        self.trace.field(self.path).and_then(series_from_value)
    }

    fn set(&mut self, values: Series<f64>) -> TraceResult<()> {
        let path = self.path;
        let (first, rest) = path.segments().split_first().ok_or(PathError::Empty)?;

        let mut current = match first {
            Segment::Key(key) => self.trace.fields.entry(key.clone()).or_insert(Value::Null),
            Segment::Index(_) => {
                return Err(TraceError::NotAContainer {
                    path: path.to_string(),
                    parent: String::new(),
                })
            }
        };
        for (depth, segment) in rest.iter().enumerate() {
            current = child_mut(current, segment, path, depth + 1)?;
        }

        *current = series_to_value(&values);
        Ok(())
    }
}

/// Step into `value`, creating the child (and the container) when missing.
fn child_mut<'v>(
    value: &'v mut Value,
    segment: &Segment,
    path: &FieldPath,
    depth: usize,
) -> TraceResult<&'v mut Value> {
    let not_a_container = || TraceError::NotAContainer {
        path: path.to_string(),
        parent: path.prefix(depth),
    };

    match segment {
        Segment::Key(key) => {
            if value.is_null() {
                *value = Value::Object(Map::new());
            }
            match value {
                Value::Object(map) => Ok(map.entry(key.clone()).or_insert(Value::Null)),
                _ => Err(not_a_container()),
            }
        }
        Segment::Index(index) => {
            if value.is_null() {
                *value = Value::Array(Vec::new());
            }
            match value {
                Value::Array(items) => {
                    if items.len() <= *index {
                        items.resize(*index + 1, Value::Null);
                    }
                    Ok(&mut items[*index])
                }
                _ => Err(not_a_container()),
            }
        }
    }
}

/// JSON spellings of the values JSON numbers cannot carry.
pub const NAN_LITERAL: &str = "NaN";
/// See [`NAN_LITERAL`].
pub const INFINITY_LITERAL: &str = "Infinity";
/// See [`NAN_LITERAL`].
pub const NEG_INFINITY_LITERAL: &str = "-Infinity";

/// Read a JSON array as numbers.
///
/// The non-finite literals written by [`series_to_value`] read back as the
/// values they encode; any other non-numeric element reads as NaN.
#[must_use]
pub fn series_from_value<T: DataFloat>(value: &Value) -> Option<Series<T>> {
    let items = value.as_array()?;
    Some(items.iter().map(number_from_value).collect())
}

/// Write numbers as a JSON array.
///
/// NaN and the infinities are written as [`NAN_LITERAL`],
/// [`INFINITY_LITERAL`] and [`NEG_INFINITY_LITERAL`], so a later reader gets
/// back exactly what was written.
#[must_use]
pub fn series_to_value<T: DataFloat>(values: &Series<T>) -> Value {
    Value::Array(values.iter().map(|&v| number_to_value(v)).collect())
}

fn number_from_value<T: DataFloat>(item: &Value) -> T {
    match item {
        Value::Number(number) => number.as_f64().map_or(T::NAN, T::from_f64_lossy),
        Value::String(text) => match text.as_str() {
            INFINITY_LITERAL => T::infinity(),
            NEG_INFINITY_LITERAL => T::neg_infinity(),
            _ => T::NAN,
        },
        _ => T::NAN,
    }
}

fn number_to_value<T: DataFloat>(value: T) -> Value {
    if value.is_valid() {
        return Number::from_f64(value.to_f64_lossy()).map_or(Value::Null, Value::Number);
    }
    let literal = if value.is_nan() {
        NAN_LITERAL
    } else if value.is_sign_positive() {
        INFINITY_LITERAL
    } else {
        NEG_INFINITY_LITERAL
    };
    Value::String(literal.to_string())
}

/// Locate the source data for `target`.
///
/// Path targets are looked up in the trace and must point at an array; a
/// blank path resolves to nothing. Array targets are returned as-is.
///
/// # Errors
///
/// Returns an error if a path target cannot be parsed.
pub fn resolve_target_array(trace: &Trace, target: &Target) -> TraceResult<Option<Series<f64>>> {
    match target {
        Target::Path(path) if path.is_empty() => Ok(None),
        Target::Path(path) => {
            let path = FieldPath::parse(path)?;
            Ok(trace.field(&path).and_then(series_from_value))
        }
        Target::Array(values) => Ok(Some(values.clone())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_trace() -> Trace {
        Trace::from_value(json!({
            "x": [10, 20, 30],
            "marker": {"size": [1.5, 2.5]},
            "customdata": [[1, 2], [3, 4]],
            "name": "prices"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = Trace::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, TraceError::NotAnObject("array")));
    }

    #[test]
    fn test_length_roundtrip() {
        let mut trace = Trace::from_value(json!({"y": [1], "_length": 4})).unwrap();
        assert_eq!(trace.length(), Some(4));
        assert!(!trace.fields().contains_key("_length"));

        trace.set_length(1);
        let value = trace.into_value().unwrap();
        assert_eq!(value, json!({"y": [1], "_length": 1}));
    }

    #[test]
    fn test_field_lookup() {
        let trace = sample_trace();
        let path = FieldPath::parse("marker.size").unwrap();
        assert_eq!(trace.field(&path), Some(&json!([1.5, 2.5])));

        let path = FieldPath::parse("customdata[1]").unwrap();
        assert_eq!(trace.field(&path), Some(&json!([3, 4])));

        let path = FieldPath::parse("marker.color").unwrap();
        assert_eq!(trace.field(&path), None);
    }

    #[test]
    fn test_accessor_get() {
        let mut trace = sample_trace();
        let path = FieldPath::parse("x").unwrap();
        let accessor = trace.accessor(&path);
        assert_eq!(accessor.get().unwrap().as_slice(), &[10.0, 20.0, 30.0]);

        let path = FieldPath::parse("name").unwrap();
        assert!(trace.accessor(&path).get().is_none());
    }

    #[test]
    fn test_accessor_get_non_numeric_as_nan() {
        let mut trace = Trace::from_value(json!({"y": [1, "a", null]})).unwrap();
        let path = FieldPath::parse("y").unwrap();
        let values = trace.accessor(&path).get().unwrap();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_accessor_set_replaces_nested() {
        let mut trace = sample_trace();
        let path = FieldPath::parse("marker.size").unwrap();
        trace
            .accessor(&path)
            .set(Series::from_vec(vec![0.0]))
            .unwrap();
        assert_eq!(trace.field(&path), Some(&json!([0.0])));
    }

    #[test]
    fn test_accessor_set_creates_missing_containers() {
        let mut trace = Trace::new();
        let path = FieldPath::parse("error_y.array[2]").unwrap();
        trace
            .accessor(&path)
            .set(Series::from_vec(vec![1.0, 2.0]))
            .unwrap();

        let value = trace.into_value().unwrap();
        assert_eq!(
            value,
            json!({"error_y": {"array": [null, null, [1.0, 2.0]]}})
        );
    }

    #[test]
    fn test_accessor_non_finite_roundtrip() {
        let mut trace = sample_trace();
        let path = FieldPath::parse("x").unwrap();
        let written = vec![0.0, f64::NEG_INFINITY, f64::INFINITY, f64::NAN];
        trace
            .accessor(&path)
            .set(Series::from_vec(written))
            .unwrap();

        assert_eq!(
            trace.field(&path),
            Some(&json!([0.0, "-Infinity", "Infinity", "NaN"]))
        );

        let values = trace.accessor(&path).get().unwrap();
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], f64::NEG_INFINITY);
        assert_eq!(values[2], f64::INFINITY);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_series_from_value_f32() {
        let values: Series<f32> = series_from_value(&json!([1.5, "-Infinity", "abc"])).unwrap();
        assert_eq!(values[0], 1.5f32);
        assert_eq!(values[1], f32::NEG_INFINITY);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_accessor_set_through_scalar_fails() {
        let mut trace = sample_trace();
        let path = FieldPath::parse("name.values").unwrap();
        let err = trace
            .accessor(&path)
            .set(Series::from_vec(vec![1.0]))
            .unwrap_err();

        match err {
            TraceError::NotAContainer { path, parent } => {
                assert_eq!(path, "name.values");
                assert_eq!(parent, "name");
            }
            other => panic!("Expected NotAContainer, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_target_array() {
        let trace = sample_trace();

        let found = resolve_target_array(&trace, &Target::Path("x".to_string())).unwrap();
        assert_eq!(found.unwrap().len(), 3);

        let missing = resolve_target_array(&trace, &Target::Path("y".to_string())).unwrap();
        assert!(missing.is_none());

        let blank = resolve_target_array(&trace, &Target::Path(String::new())).unwrap();
        assert!(blank.is_none());

        let literal = Target::Array(Series::from_vec(vec![4.0, 5.0]));
        let found = resolve_target_array(&trace, &literal).unwrap();
        assert_eq!(found.unwrap().as_slice(), &[4.0, 5.0]);

        let bad = resolve_target_array(&trace, &Target::Path("x..y".to_string()));
        assert!(matches!(bad, Err(TraceError::InvalidPath(_))));
    }

    #[test]
    fn test_transform_specs() {
        let trace = Trace::from_value(json!({
            "x": [1],
            "transforms": [{"type": "pct_change"}]
        }))
        .unwrap();
        assert_eq!(trace.transform_specs(), vec![json!({"type": "pct_change"})]);
        assert!(sample_trace().transform_specs().is_empty());
    }

    #[test]
    fn test_target_untagged_serde() {
        let target: Target = serde_json::from_value(json!("marker.size")).unwrap();
        assert_eq!(target.as_path(), Some("marker.size"));

        let target: Target = serde_json::from_value(json!([1.0, 2.0])).unwrap();
        assert_eq!(target, Target::Array(Series::from_vec(vec![1.0, 2.0])));
        assert_eq!(Target::default().as_path(), Some("x"));
    }
}
